//! Domain errors

use thiserror::Error;

use crate::domain::TodoId;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Todo not found: {0}")]
    TodoNotFound(TodoId),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
