//! Error types for listener registration

use thiserror::Error;

/// Rejected listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Target id must not be empty")]
    EmptyTargetId,

    #[error("Callback name must not be empty")]
    EmptyCallbackName,
}

/// Result type alias for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
