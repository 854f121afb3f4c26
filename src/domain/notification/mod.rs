//! Notifications sent to users outside the request/response cycle

use async_trait::async_trait;

use crate::domain::user::UserDto;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Delivers account notifications (e.g. a welcome email)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notify a freshly registered user
    async fn send_welcome(&self, user: &UserDto) -> Result<(), DomainError>;
}
