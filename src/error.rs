/// Error types that can occur while building, evaluating, or querying models
///
/// # Variants
///
/// - `ConfigurationError` - indicates an invalid hyperparameter or evaluation setting, such as a confidence factor outside (0, 1) or a fold count exceeding the dataset size
/// - `DataError` - indicates the input data does not meet the expected shape or content rules, such as an empty dataset, a row with the wrong feature arity, or a non-finite feature value
/// - `InvariantViolation` - indicates a broken internal precondition, such as an empty row subset reaching the tree builder; these are programming errors and the whole operation is aborted
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    ConfigurationError(String),
    DataError(String),
    InvariantViolation(&'static str),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            ModelError::DataError(msg) => write!(f, "Data error: {}", msg),
            ModelError::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
        }
    }
}

/// Implements the standard error trait for ModelError
impl std::error::Error for ModelError {}
