use crate::error::ModelError;
use ndarray::prelude::*;
use rayon::prelude::*;

/// A node of a trained decision tree.
///
/// # Variants
///
/// - `Leaf` - A terminal node holding a prediction.
///   - `class`: Predicted class code, the argmax of the distribution (lowest code on ties).
///   - `distribution`: Class-probability distribution over the whole label vocabulary; raw relative frequencies of the training rows that reached the leaf, summing to 1.0 with no smoothing.
/// - `Internal` - A decision node testing one feature.
///   - `feature_index`: Column the node tests.
///   - `threshold`: Rows with values `<=` the threshold descend left, `>` descends right.
///   - `left` / `right`: The two children; every internal node owns exactly two.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        class: usize,
        distribution: Vec<f64>,
    },
    Internal {
        feature_index: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A flat description of one tree node for external rendering.
///
/// # Fields
///
/// - `id` - Position of the node in the exported list (pre-order)
/// - `feature_index` / `threshold` - Split condition, `None` for leaves
/// - `class` - Predicted class code, `None` for internal nodes
/// - `left` / `right` - Ids of the children, `None` for leaves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphNode {
    pub id: usize,
    pub feature_index: Option<usize>,
    pub threshold: Option<f64>,
    pub class: Option<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// A trained, immutable decision tree over a fixed feature arity and label vocabulary.
///
/// The tree exclusively owns its nodes and never changes after construction, so
/// any number of callers may query it concurrently. Build one with
/// [`TreeBuilder`](crate::tree::TreeBuilder) or
/// [`train_final_model`](crate::tree::train_final_model).
///
/// # Example
/// ```rust
/// use croprec::dataset::Dataset;
/// use croprec::tree::{TreeParams, train_final_model};
/// use ndarray::array;
///
/// let features = array![
///     [90.0, 42.0, 43.0, 21.0, 82.0, 6.5, 203.0],
///     [85.0, 58.0, 41.0, 22.0, 80.0, 7.0, 227.0],
///     [80.0, 48.0, 40.0, 23.0, 83.0, 6.8, 251.0],
///     [60.0, 55.0, 44.0, 23.0, 63.0, 5.7, 88.0],
///     [71.0, 54.0, 16.0, 22.0, 63.0, 6.3, 84.0],
///     [78.0, 42.0, 42.0, 20.0, 62.0, 6.9, 80.0],
/// ];
/// let labels = ["rice", "rice", "rice", "maize", "maize", "maize"];
/// let dataset = Dataset::new(features, &labels).unwrap();
///
/// let tree = train_final_model(&dataset, TreeParams::default()).unwrap();
/// let class = tree.classify(&[88.0, 50.0, 41.0, 21.5, 81.0, 6.7, 230.0]).unwrap();
/// assert_eq!(dataset.get_vocabulary()[class], "rice");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root: Box<Node>,
    n_features: usize,
    n_classes: usize,
}

impl DecisionTree {
    pub(crate) fn from_parts(root: Node, n_features: usize, n_classes: usize) -> Self {
        Self {
            root: Box::new(root),
            n_features,
            n_classes,
        }
    }

    get_field_as_ref!(get_root, root, &Node);
    get_field!(get_n_features, n_features, usize);
    get_field!(get_n_classes, n_classes, usize);

    fn check_arity(&self, len: usize) -> Result<(), ModelError> {
        if len != self.n_features {
            return Err(ModelError::DataError(format!(
                "Feature vector has {} values but the tree was trained on {}",
                len, self.n_features
            )));
        }
        Ok(())
    }

    /// Walks from the root to the leaf a feature vector is routed to.
    fn leaf(&self, x: ArrayView1<f64>) -> &Node {
        let mut node = self.root.as_ref();
        loop {
            match node {
                Node::Leaf { .. } => return node,
                Node::Internal {
                    feature_index,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature_index] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Classifies a single feature vector.
    ///
    /// # Parameters
    ///
    /// * `x` - Feature vector of length `n_features`
    ///
    /// # Returns
    ///
    /// - `Ok(usize)` - The predicted class code
    /// - `Err(ModelError::DataError)` - If the vector has the wrong arity
    pub fn classify(&self, x: &[f64]) -> Result<usize, ModelError> {
        self.check_arity(x.len())?;
        Ok(self.classify_view(ArrayView1::from(x)))
    }

    /// Classifies a feature vector supplied as an `ndarray` view, without an arity check.
    ///
    /// Callers iterating rows of a matrix already shaped `(_, n_features)` use
    /// this to avoid re-validating every row.
    pub fn classify_view(&self, x: ArrayView1<f64>) -> usize {
        match self.leaf(x) {
            Node::Leaf { class, .. } => *class,
            Node::Internal { .. } => unreachable!("leaf() always returns a leaf"),
        }
    }

    /// Returns the class-probability distribution a feature vector is routed to.
    ///
    /// The entries are non-negative, sum to 1.0, and cover the whole label
    /// vocabulary in code order.
    ///
    /// # Parameters
    ///
    /// * `x` - Feature vector of length `n_features`
    ///
    /// # Returns
    ///
    /// - `Ok(&[f64])` - The leaf's distribution
    /// - `Err(ModelError::DataError)` - If the vector has the wrong arity
    pub fn distribution(&self, x: &[f64]) -> Result<&[f64], ModelError> {
        self.check_arity(x.len())?;
        match self.leaf(ArrayView1::from(x)) {
            Node::Leaf { distribution, .. } => Ok(distribution),
            Node::Internal { .. } => unreachable!("leaf() always returns a leaf"),
        }
    }

    /// Classifies every row of a feature matrix in parallel.
    ///
    /// Traversal is read-only, so rows are dispatched across threads with rayon.
    ///
    /// # Parameters
    ///
    /// * `x` - Feature matrix with shape (n_samples, n_features)
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<usize>)` - One predicted class code per row
    /// - `Err(ModelError::DataError)` - If the matrix has the wrong number of columns
    pub fn classify_batch(&self, x: ArrayView2<f64>) -> Result<Array1<usize>, ModelError> {
        self.check_arity(x.ncols())?;

        let predictions: Vec<usize> = x
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| self.classify_view(row))
            .collect();

        Ok(Array1::from_vec(predictions))
    }

    /// Returns the class-probability distribution for every row of a feature matrix in parallel.
    ///
    /// # Parameters
    ///
    /// * `x` - Feature matrix with shape (n_samples, n_features)
    ///
    /// # Returns
    ///
    /// - `Ok(Array2<f64>)` - Distributions with shape (n_samples, n_classes); every row sums to 1.0
    /// - `Err(ModelError::DataError)` - If the matrix has the wrong number of columns
    pub fn distribution_batch(&self, x: ArrayView2<f64>) -> Result<Array2<f64>, ModelError> {
        self.check_arity(x.ncols())?;

        let rows: Vec<Vec<f64>> = x
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| match self.leaf(row) {
                Node::Leaf { distribution, .. } => distribution.clone(),
                Node::Internal { .. } => unreachable!("leaf() always returns a leaf"),
            })
            .collect();

        let mut result = Array2::zeros((x.nrows(), self.n_classes));
        for (i, distribution) in rows.iter().enumerate() {
            for (j, &p) in distribution.iter().enumerate() {
                result[[i, j]] = p;
            }
        }

        Ok(result)
    }

    /// Counts the leaves of the tree.
    pub fn n_leaves(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => walk(left) + walk(right),
            }
        }
        walk(&self.root)
    }

    /// Counts the internal (decision) nodes of the tree.
    pub fn n_internal_nodes(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + walk(left) + walk(right),
            }
        }
        walk(&self.root)
    }

    /// Returns the depth of the tree; a single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        walk(&self.root)
    }

    /// Exports the tree as a flat pre-order node list for external renderers.
    ///
    /// Each entry carries the split condition or predicted class plus the ids
    /// of its children, which is enough to reconstruct or draw the full graph.
    pub fn graph(&self) -> Vec<GraphNode> {
        fn walk(node: &Node, out: &mut Vec<GraphNode>) -> usize {
            let id = out.len();
            match node {
                Node::Leaf { class, .. } => {
                    out.push(GraphNode {
                        id,
                        feature_index: None,
                        threshold: None,
                        class: Some(*class),
                        left: None,
                        right: None,
                    });
                }
                Node::Internal {
                    feature_index,
                    threshold,
                    left,
                    right,
                } => {
                    out.push(GraphNode {
                        id,
                        feature_index: Some(*feature_index),
                        threshold: Some(*threshold),
                        class: None,
                        left: None,
                        right: None,
                    });
                    let left_id = walk(left, out);
                    let right_id = walk(right, out);
                    out[id].left = Some(left_id);
                    out[id].right = Some(right_id);
                }
            }
            id
        }

        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out
    }

    /// Generates a human-readable rendering of the tree structure.
    ///
    /// Internal nodes print their split condition using the supplied feature
    /// names and leaves print their predicted label with its training
    /// confidence, connected with ASCII branch characters.
    ///
    /// # Parameters
    ///
    /// - `feature_names` - One name per feature column
    /// - `vocabulary` - One label per class code
    ///
    /// # Returns
    ///
    /// - `Ok(String)` - The formatted tree
    /// - `Err(ModelError::DataError)` - If either name list does not match the tree's arity or class count
    pub fn render(&self, feature_names: &[&str], vocabulary: &[String]) -> Result<String, ModelError> {
        if feature_names.len() != self.n_features {
            return Err(ModelError::DataError(format!(
                "{} feature names provided for {} features",
                feature_names.len(),
                self.n_features
            )));
        }
        if vocabulary.len() != self.n_classes {
            return Err(ModelError::DataError(format!(
                "{} labels provided for {} classes",
                vocabulary.len(),
                self.n_classes
            )));
        }

        let mut output = String::from("Decision Tree Structure:\n");
        self.render_node(&self.root, feature_names, vocabulary, &mut output, "", true);
        Ok(output)
    }

    // Recursively print tree structure
    fn render_node(
        &self,
        node: &Node,
        feature_names: &[&str],
        vocabulary: &[String],
        output: &mut String,
        prefix: &str,
        is_last: bool,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{}{}", prefix, connector));

        match node {
            Node::Leaf {
                class,
                distribution,
            } => {
                output.push_str(&format!(
                    "Leaf: {} (confidence {:.4})\n",
                    vocabulary[*class], distribution[*class]
                ));
            }
            Node::Internal {
                feature_index,
                threshold,
                left,
                right,
            } => {
                output.push_str(&format!(
                    "Split: {} <= {:.4}\n",
                    feature_names[*feature_index], threshold
                ));

                let new_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                self.render_node(left, feature_names, vocabulary, output, &new_prefix, false);
                self.render_node(right, feature_names, vocabulary, output, &new_prefix, true);
            }
        }
    }
}
