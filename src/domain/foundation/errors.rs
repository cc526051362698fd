//! Error types for the domain layer.
//!
//! Four categories cover every failure a service can surface: validation
//! (bad input, recoverable), not-found (a referenced id is absent from a
//! repository), precondition (operation invoked in a state that forbids it)
//! and storage (save/load trouble). Simulated gateway declines are *not*
//! errors; they are recorded in the payment's status field.

use thiserror::Error;

/// Standard domain error shared by all services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field is blank or carries an invalid value.
    #[error("Field '{field}' is invalid: {message}")]
    Validation { field: String, message: String },

    /// An operation referenced an id absent from its repository.
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// The operation is not allowed in the entity's current state.
    #[error("Operation not permitted: {message}")]
    Precondition { message: String },

    /// Persistence failed (serialization or file write).
    #[error("Storage failure: {message}")]
    Storage { message: String },
}

impl DomainError {
    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a not-found error for an entity kind and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        DomainError::Precondition {
            message: message.into(),
        }
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    /// True for the not-found category, so callers can react differently
    /// from plain validation failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}
