pub use crate::dataset::{
    Dataset, FEATURE_BOUNDS, FEATURE_NAMES, NUM_FEATURES, validate_feature_vector,
};
pub use crate::error::ModelError;
pub use crate::evaluation::{
    ConfusionCounts, CrossValidationReport, FoldMetrics, cross_validate, fold_partitions,
    permuted_indices,
};
pub use crate::recommend::{CropRecommender, Recommendation};
pub use crate::tree::{
    DecisionTree, GraphNode, Node, SplitCandidate, TreeBuilder, TreeParams, best_split,
    best_split_for_feature, train_final_model,
};
