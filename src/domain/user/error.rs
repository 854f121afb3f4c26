//! Errors returned by user operations

use thiserror::Error;

use super::validation::UserValidationError;
use crate::domain::DomainError;

/// Password hashing and verification failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The candidate password does not match the stored hash
    #[error("Password does not match")]
    Mismatch,

    #[error("Failed to hash password: {0}")]
    Hash(String),

    /// The stored hash could not be parsed
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Errors returned by the user service
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Empty credentials: {0}")]
    EmptyCredentials(#[from] UserValidationError),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Failed to delete user: {0}")]
    DeleteFailed(#[source] DomainError),

    #[error("Failed to update user: {0}")]
    UpdateFailed(#[source] DomainError),

    #[error(transparent)]
    Hash(PasswordError),

    #[error(transparent)]
    Storage(#[from] DomainError),
}
