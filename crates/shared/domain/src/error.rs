//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// One or more field rules rejected a record
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    /// Password hashing or digest parsing failed
    #[error("Password error: {0}")]
    Password(String),

    /// Form submission could not be encoded
    #[error("Form error: {0}")]
    Form(String),
}

impl DomainError {
    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Create a form error
    pub fn form(msg: impl Into<String>) -> Self {
        DomainError::Form(msg.into())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Invalid(errors)
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
