//! Centralized error handling module
//!
//! Provides the unified error taxonomy for the reporting core. Store
//! failures stay opaque: whatever a collaborator returns is wrapped and
//! surfaced to the caller verbatim.

use thiserror::Error;

/// Application-wide error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A referenced record (typically the visit) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The record exists but belongs to a different user
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Input failed a primitive range check
    #[error("Validation error: {0}")]
    Validation(String),

    /// A collaborator (store) call failed; opaque and propagated as-is
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the caller may retry the whole operation.
    ///
    /// Store failures are treated as transient; report generation fully
    /// overwrites the persisted snapshot, so retrying is safe. The other
    /// variants are terminal until the caller fixes its input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Store(_))
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = AppError::NotFound("visit 42".to_string());
        assert_eq!(error.to_string(), "Not found: visit 42");
    }

    #[test]
    fn test_unauthorized_display() {
        let error = AppError::Unauthorized("visit belongs to another user".to_string());
        assert!(error.to_string().starts_with("Unauthorized"));
    }

    #[test]
    fn test_store_error_wraps_source() {
        let source = anyhow::anyhow!("connection reset");
        let error: AppError = source.into();
        assert!(error.to_string().contains("connection reset"));
    }

    #[test]
    fn test_retryability() {
        assert!(AppError::Store(anyhow::anyhow!("timeout")).is_retryable());
        assert!(!AppError::NotFound("gone".into()).is_retryable());
        assert!(!AppError::Unauthorized("nope".into()).is_retryable());
        assert!(!AppError::Validation("bad range".into()).is_retryable());
    }
}
