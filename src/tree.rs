use crate::error::ModelError;

/// Hyperparameters controlling decision tree growth and pruning.
///
/// # Fields
///
/// - `confidence_factor` - Pruning aggressiveness in (0, 1); lower values inflate the pessimistic error estimate of specific subtrees and therefore prune more.
/// - `min_instances_per_leaf` - Minimum number of training rows a leaf may hold. Splits producing a smaller side are rejected, and nodes with fewer than twice this many rows are never split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub confidence_factor: f64,
    pub min_instances_per_leaf: usize,
}

/// Default hyperparameters: confidence factor 0.25 and a minimum of 2 training
/// rows per leaf (the classic C4.5 `-C 0.25 -M 2` configuration).
impl Default for TreeParams {
    fn default() -> Self {
        Self {
            confidence_factor: 0.25,
            min_instances_per_leaf: 2,
        }
    }
}

impl TreeParams {
    /// Validates the hyperparameter ranges.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If both parameters are in range
    /// - `Err(ModelError::ConfigurationError)` - If the confidence factor is outside (0, 1) or the leaf minimum is zero
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.confidence_factor > 0.0 && self.confidence_factor < 1.0) {
            return Err(ModelError::ConfigurationError(format!(
                "confidence_factor must be in (0, 1), got {}",
                self.confidence_factor
            )));
        }

        if self.min_instances_per_leaf == 0 {
            return Err(ModelError::ConfigurationError(
                "min_instances_per_leaf must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Recursive tree growth with information-gain splitting and pessimistic-error pruning
pub mod builder;
/// The trained, immutable decision tree and its traversal queries
pub mod model;
/// Best binary-threshold split search over a row subset
pub mod split;

pub use builder::*;
pub use model::*;
pub use split::*;
