use crate::dataset::Dataset;
use crate::error::ModelError;
use crate::tree::{DecisionTree, TreeParams, train_final_model};

/// A single crop recommendation with its supporting evidence.
///
/// # Fields
///
/// - `label` - Recommended crop, resolved from the training vocabulary
/// - `confidence` - Probability the leaf assigns to the recommended crop
/// - `distribution` - Full class-probability distribution in vocabulary order
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub label: String,
    pub confidence: f64,
    pub distribution: Vec<f64>,
}

/// Answers crop recommendation queries with a trained decision tree and the
/// label vocabulary of its training data.
///
/// The recommender owns both pieces so a caller only needs to hand over a
/// feature vector; range policing of raw user input belongs to the
/// presentation layer (see
/// [`validate_feature_vector`](crate::dataset::validate_feature_vector)).
///
/// # Example
/// ```rust
/// use croprec::dataset::Dataset;
/// use croprec::recommend::CropRecommender;
/// use croprec::tree::TreeParams;
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
/// let recommender = CropRecommender::fit(&dataset, TreeParams::default()).unwrap();
/// let result = recommender.recommend(&[88.0, 50.0, 41.0, 21.5, 81.0, 6.7, 230.0]).unwrap();
/// assert_eq!(result.label, "rice");
/// assert!(result.confidence > 0.9);
/// ```
#[derive(Debug, Clone)]
pub struct CropRecommender {
    tree: DecisionTree,
    vocabulary: Vec<String>,
}

impl CropRecommender {
    /// Creates a recommender from an already trained tree and its vocabulary.
    ///
    /// # Parameters
    ///
    /// - `tree` - Trained decision tree
    /// - `vocabulary` - Label per class code, in training order
    ///
    /// # Returns
    ///
    /// - `Ok(CropRecommender)` - If the vocabulary covers the tree's classes
    /// - `Err(ModelError::ConfigurationError)` - If the vocabulary length differs from the tree's class count
    pub fn new(tree: DecisionTree, vocabulary: Vec<String>) -> Result<Self, ModelError> {
        if vocabulary.len() != tree.get_n_classes() {
            return Err(ModelError::ConfigurationError(format!(
                "vocabulary holds {} labels but the tree distinguishes {} classes",
                vocabulary.len(),
                tree.get_n_classes()
            )));
        }

        Ok(Self { tree, vocabulary })
    }

    /// Trains a tree on every row of the dataset and wraps it together with
    /// the dataset's vocabulary.
    ///
    /// # Parameters
    ///
    /// - `dataset` - Full training data
    /// - `params` - Tree hyperparameters
    ///
    /// # Returns
    ///
    /// - `Ok(CropRecommender)` - The ready-to-query recommender
    /// - `Err(ModelError::ConfigurationError)` - If the hyperparameters are out of range
    pub fn fit(dataset: &Dataset, params: TreeParams) -> Result<Self, ModelError> {
        let tree = train_final_model(dataset, params)?;
        Self::new(tree, dataset.get_vocabulary().to_vec())
    }

    /// Gets the underlying decision tree.
    pub fn get_tree(&self) -> &DecisionTree {
        &self.tree
    }

    get_field_as_ref!(get_vocabulary, vocabulary, &[String]);

    /// Recommends a crop for a feature vector.
    ///
    /// The vector is accepted as-is; it is the caller's job to validate
    /// physical plausibility beforehand.
    ///
    /// # Parameters
    ///
    /// * `features` - Feature vector in [`FEATURE_NAMES`](crate::dataset::FEATURE_NAMES) column order
    ///
    /// # Returns
    ///
    /// - `Ok(Recommendation)` - Label, confidence, and the full distribution
    /// - `Err(ModelError::DataError)` - If the vector has the wrong arity
    pub fn recommend(&self, features: &[f64]) -> Result<Recommendation, ModelError> {
        let class = self.tree.classify(features)?;
        let distribution = self.tree.distribution(features)?.to_vec();

        Ok(Recommendation {
            label: self.vocabulary[class].clone(),
            confidence: distribution[class],
            distribution,
        })
    }
}
