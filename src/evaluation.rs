/// K-fold cross-validation over the decision tree builder
pub mod cross_validation;
/// Confusion counting and per-fold precision/recall/accuracy metrics
pub mod metrics;

pub use cross_validation::*;
pub use metrics::*;
