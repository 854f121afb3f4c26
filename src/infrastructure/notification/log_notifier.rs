//! Notifier that records welcome messages in the application log

use async_trait::async_trait;
use tracing::info;

use crate::domain::notification::Notifier;
use crate::domain::user::UserDto;
use crate::domain::DomainError;

/// Notifier that writes each message as a structured log event
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }

    fn welcome_message(user: &UserDto) -> String {
        format!("Welcome aboard, {}!", user.username)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_welcome(&self, user: &UserDto) -> Result<(), DomainError> {
        info!(
            user_id = %user.id,
            email = %user.email,
            message = %Self::welcome_message(user),
            "Welcome notification sent"
        );

        Ok(())
    }
}
