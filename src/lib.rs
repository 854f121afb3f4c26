//! User accounts service
//!
//! Registration, authentication and management of user accounts over HTTP:
//! - Argon2 password hashing
//! - HS256 bearer tokens with per-account ownership checks
//! - SQLite or in-memory user storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use api::state::{AppState, UserServiceTrait};
use infrastructure::{
    auth::{JwtConfig, JwtGenerator, JwtService},
    notification::LogNotifier,
    storage::{connect, SqliteConfig},
    user::{Argon2Hasher, InMemoryUserRepository, SqliteUserRepository, UserService},
};

/// Build the application state from configuration
///
/// With `in_memory` set, users live in process memory and vanish on exit;
/// otherwise they are stored in the configured SQLite database.
pub async fn create_app_state_with_config(
    config: &AppConfig,
    in_memory: bool,
) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    let user_service: Arc<dyn UserServiceTrait> = if in_memory {
        info!("Using in-memory user store");
        Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
        ))
    } else {
        let sqlite = SqliteConfig::new(config.database.path.clone())
            .with_max_connections(config.database.max_connections);
        let pool = connect(&sqlite).await?;
        Arc::new(UserService::new(
            Arc::new(SqliteUserRepository::new(pool)),
            hasher,
        ))
    };

    Ok(AppState::new(
        user_service,
        create_jwt_service(config),
        Arc::new(LogNotifier::new()),
    ))
}

/// Create the token service from the configured secret, or a random one
fn create_jwt_service(config: &AppConfig) -> Arc<dyn JwtGenerator> {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            warn!(
                "No APP__AUTH__JWT_SECRET configured. Generating random secret. \
                Tokens will NOT survive a restart."
            );
            generate_random_secret()
        });

    Arc::new(JwtService::new(JwtConfig::new(
        secret,
        config.auth.jwt_expiration_hours,
    )))
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserDto, UserId};

    fn dto() -> UserDto {
        UserDto {
            id: UserId::new(1),
            username: "bob".to_string(),
            email: "bob@x.com".to_string(),
        }
    }

    #[test]
    fn test_random_secret_shape() {
        let a = generate_random_secret();
        let b = generate_random_secret();

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_configured_secret_is_used() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("shared-secret".to_string());

        let first = create_jwt_service(&config);
        let second = create_jwt_service(&config);

        let issued = first.generate(&dto()).unwrap();
        assert!(second.validate(&issued.token).is_ok());
    }

    #[test]
    fn test_missing_secret_falls_back_to_random() {
        let config = AppConfig::default();

        let first = create_jwt_service(&config);
        let second = create_jwt_service(&config);

        let issued = first.generate(&dto()).unwrap();
        assert!(second.validate(&issued.token).is_err());
    }

    #[tokio::test]
    async fn test_create_app_state_in_memory() {
        let state = create_app_state_with_config(&AppConfig::default(), true)
            .await
            .unwrap();

        assert!(state.user_service.get_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_app_state_with_sqlite_memory() {
        let mut config = AppConfig::default();
        config.database.path = infrastructure::storage::IN_MEMORY_PATH.to_string();

        let state = create_app_state_with_config(&config, false).await.unwrap();

        assert!(state.user_service.get_users().await.unwrap().is_empty());
    }
}
