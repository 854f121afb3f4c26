//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Implementations must enforce username uniqueness themselves and report a
/// violation as [`DomainError::Conflict`].
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Insert a new user and return it with the assigned id
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Get a user by id
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// List all users ordered by id
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Change the username of an existing user
    ///
    /// Fails with `NotFound` when no row matches and `Conflict` when the
    /// username belongs to someone else.
    async fn update_username(&self, id: UserId, username: &str) -> Result<(), DomainError>;

    /// Delete a user, failing with `NotFound` when nothing was removed
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;

    /// Cheap round trip proving the store is reachable
    async fn ping(&self) -> Result<(), DomainError>;

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}
