//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_errors_are_retryable() {
        assert!(ApplicationError::ExternalService("timeout".into()).is_retryable());
    }

    #[test]
    fn configuration_errors_are_not_retryable() {
        assert!(!ApplicationError::Configuration("missing api_key".into()).is_retryable());
    }

    #[test]
    fn domain_errors_convert() {
        let err: ApplicationError = DomainError::InvalidStopId(String::new()).into();
        assert!(matches!(err, ApplicationError::Domain(_)));
        assert_eq!(err.to_string(), "Invalid stop id: ");
    }
}
