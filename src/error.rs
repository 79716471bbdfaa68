// WHY: typed errors for the comparison core
// Configuration problems and missing document capabilities are separate variants

use thiserror::Error;

/// Errors raised before or around a comparison run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffError {
    /// One or more ignore tokens outside `{punct, space}`.
    #[error("unsupported ignore options: {}", .0.join(", "))]
    InvalidIgnoreOptions(Vec<String>),

    /// Similarity threshold outside `[0, 1]` (NaN included).
    #[error("threshold must be between 0 and 1, got {0}")]
    ThresholdOutOfRange(f64),

    /// The runtime has no adapter for a required document capability.
    #[error("{capability} is not available: {hint}")]
    CapabilityUnavailable { capability: String, hint: String },
}

impl DiffError {
    /// True for errors caused by invalid configuration values.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DiffError::InvalidIgnoreOptions(_) | DiffError::ThresholdOutOfRange(_)
        )
    }
}

/// Result type for core operations.
pub type DiffResult<T> = Result<T, DiffError>;
