use crate::dataset::Dataset;
use crate::error::ModelError;
use crate::math::pessimistic_added_errors;
use crate::tree::TreeParams;
use crate::tree::model::{DecisionTree, Node};
use crate::tree::split::best_split;

/// Pruning keeps a subtree when collapsing it would raise the estimated error
/// count by more than this tolerance.
const COLLAPSE_TOLERANCE: f64 = 0.1;

/// A working tree node during growth, carrying the class counts of the
/// training rows that reached it so the pruning pass can estimate errors.
struct GrownNode {
    counts: Vec<f64>,
    kind: GrownKind,
}

enum GrownKind {
    Leaf,
    Internal {
        feature_index: usize,
        threshold: f64,
        left: Box<GrownNode>,
        right: Box<GrownNode>,
    },
}

/// Builds decision trees over a dataset by recursive information-gain
/// partitioning followed by pessimistic-error pruning.
///
/// The builder borrows the dataset and operates on row-index subsets, so
/// per-fold training during cross-validation never copies sample data.
///
/// # Example
/// ```rust
/// use croprec::dataset::Dataset;
/// use croprec::tree::{TreeBuilder, TreeParams};
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
/// let builder = TreeBuilder::new(&dataset, TreeParams::default());
/// let tree = builder.build(&dataset.all_indices()).unwrap();
/// assert!(tree.n_leaves() >= 1);
/// ```
pub struct TreeBuilder<'a> {
    dataset: &'a Dataset,
    params: TreeParams,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder over a dataset with the given hyperparameters.
    pub fn new(dataset: &'a Dataset, params: TreeParams) -> Self {
        Self { dataset, params }
    }

    get_field!(get_params, params, TreeParams);

    /// Builds a pruned decision tree from a row-index subset.
    ///
    /// Growth stops at a leaf when the subset is smaller than twice the leaf
    /// minimum, is label-pure, admits no valid split, or when the best split
    /// would leave either side below the leaf minimum. After full growth a
    /// post-order pruning pass collapses every subtree whose pessimistic error
    /// estimate would not worsen by becoming a single leaf.
    ///
    /// # Parameters
    ///
    /// * `indices` - Row subset to train on; callers must never pass an empty subset
    ///
    /// # Returns
    ///
    /// - `Ok(DecisionTree)` - The trained tree
    /// - `Err(ModelError::ConfigurationError)` - If the hyperparameters are out of range
    /// - `Err(ModelError::InvariantViolation)` - If the subset is empty; no partial tree is returned
    pub fn build(&self, indices: &[usize]) -> Result<DecisionTree, ModelError> {
        self.params.validate()?;

        if indices.is_empty() {
            return Err(ModelError::InvariantViolation(
                "tree builder received an empty row subset",
            ));
        }

        let mut root = self.grow(indices);
        prune(&mut root, self.params.confidence_factor);

        Ok(DecisionTree::from_parts(
            freeze(root),
            self.dataset.n_features(),
            self.dataset.n_classes(),
        ))
    }

    fn grow(&self, indices: &[usize]) -> GrownNode {
        let counts = self.dataset.class_counts(indices);
        let min_leaf = self.params.min_instances_per_leaf;

        if indices.len() < 2 * min_leaf || is_pure(&counts) {
            return GrownNode {
                counts,
                kind: GrownKind::Leaf,
            };
        }

        let Some(candidate) = best_split(self.dataset, indices) else {
            return GrownNode {
                counts,
                kind: GrownKind::Leaf,
            };
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices.iter().partition(
            |&&row| self.dataset.feature(row, candidate.feature_index) <= candidate.threshold,
        );

        if left_indices.len() < min_leaf || right_indices.len() < min_leaf {
            return GrownNode {
                counts,
                kind: GrownKind::Leaf,
            };
        }

        GrownNode {
            counts,
            kind: GrownKind::Internal {
                feature_index: candidate.feature_index,
                threshold: candidate.threshold,
                left: Box::new(self.grow(&left_indices)),
                right: Box::new(self.grow(&right_indices)),
            },
        }
    }
}

/// Trains a production tree on every row of the dataset.
///
/// # Parameters
///
/// - `dataset` - Full training data
/// - `params` - Growth and pruning hyperparameters
///
/// # Returns
///
/// - `Ok(DecisionTree)` - The trained tree
/// - `Err(ModelError::ConfigurationError)` - If the hyperparameters are out of range
pub fn train_final_model(dataset: &Dataset, params: TreeParams) -> Result<DecisionTree, ModelError> {
    TreeBuilder::new(dataset, params).build(&dataset.all_indices())
}

fn is_pure(counts: &[f64]) -> bool {
    counts.iter().filter(|&&count| count > 0.0).count() <= 1
}

/// Pessimistic estimate of the errors a node would make as a leaf.
fn leaf_errors(counts: &[f64], confidence_factor: f64) -> f64 {
    let n: f64 = counts.iter().sum();
    let e = n - counts.iter().cloned().fold(0.0, f64::max);
    e + pessimistic_added_errors(n, e, confidence_factor)
}

fn subtree_errors(node: &GrownNode, confidence_factor: f64) -> f64 {
    match &node.kind {
        GrownKind::Leaf => leaf_errors(&node.counts, confidence_factor),
        GrownKind::Internal { left, right, .. } => {
            subtree_errors(left, confidence_factor) + subtree_errors(right, confidence_factor)
        }
    }
}

/// Post-order pruning pass: children first, then this node.
fn prune(node: &mut GrownNode, confidence_factor: f64) {
    let GrownKind::Internal { left, right, .. } = &mut node.kind else {
        return;
    };

    prune(left, confidence_factor);
    prune(right, confidence_factor);

    let branch_errors =
        subtree_errors(left, confidence_factor) + subtree_errors(right, confidence_factor);
    let collapsed_errors = leaf_errors(&node.counts, confidence_factor);

    if collapsed_errors <= branch_errors + COLLAPSE_TOLERANCE {
        node.kind = GrownKind::Leaf;
    }
}

/// Converts the working tree into the immutable prediction structure,
/// normalizing leaf counts into probability distributions.
fn freeze(node: GrownNode) -> Node {
    match node.kind {
        GrownKind::Leaf => {
            let total: f64 = node.counts.iter().sum();
            let distribution: Vec<f64> = node.counts.iter().map(|&count| count / total).collect();

            // Argmax with lowest-code tie-break
            let mut class = 0;
            for (code, &count) in node.counts.iter().enumerate() {
                if count > node.counts[class] {
                    class = code;
                }
            }

            Node::Leaf {
                class,
                distribution,
            }
        }
        GrownKind::Internal {
            feature_index,
            threshold,
            left,
            right,
        } => Node::Internal {
            feature_index,
            threshold,
            left: Box::new(freeze(*left)),
            right: Box::new(freeze(*right)),
        },
    }
}
