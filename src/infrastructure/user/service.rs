//! User service for registration, authentication and account management

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::domain::user::{
    validate_sign_in, validate_sign_up, validate_username, NewUser, PasswordError, User,
    UserDto, UserError, UserId, UserRepository,
};

use super::password::PasswordHasher;

/// Password whose hash stands in for accounts that do not exist
const PLACEHOLDER_PASSWORD: &str = "placeholder-password-for-missing-accounts";

/// Request for registering a new user
#[derive(Clone, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Request for signing in
#[derive(Clone, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Request for changing a username
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: String,
}

/// User service for authentication and management
///
/// Apart from a lazily computed placeholder hash, every call is a single
/// pass against the repository.
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    /// Hash verified against when sign-in names an unknown user
    placeholder_hash: OnceCell<String>,
}

impl<R: UserRepository, H: PasswordHasher + 'static> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            placeholder_hash: OnceCell::new(),
        }
    }

    /// Register a new user
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<UserDto, UserError> {
        validate_sign_up(&request.username, &request.email, &request.password)?;

        if self.repository.username_exists(&request.username).await? {
            return Err(UserError::UserAlreadyExists(request.username));
        }

        let password_hash = self.hash_password(request.password).await?;

        let new_user = NewUser::new(&request.username, request.email, password_hash);

        let user = self.repository.create(new_user).await.map_err(|e| {
            if e.is_conflict() {
                UserError::UserAlreadyExists(request.username.clone())
            } else {
                UserError::Storage(e)
            }
        })?;

        info!(user_id = %user.id(), username = %user.username(), "User signed up");

        Ok(UserDto::from(user))
    }

    /// Check a username/password pair
    pub async fn sign_in(&self, request: SignInRequest) -> Result<UserDto, UserError> {
        validate_sign_in(&request.username, &request.password)?;

        let user = match self.repository.get_by_username(&request.username).await? {
            Some(user) => user,
            None => {
                // Same hashing cost as a wrong password
                self.verify_placeholder(request.password).await;
                return Err(UserError::UserNotFound);
            }
        };

        self.verify_password(request.password, &user).await?;

        debug!(user_id = %user.id(), "User signed in");

        Ok(UserDto::from(user))
    }

    /// List every user in store order
    pub async fn get_users(&self) -> Result<Vec<UserDto>, UserError> {
        let users = self.repository.list().await?;
        Ok(users.iter().map(UserDto::from).collect())
    }

    /// Check that the store answers
    pub async fn ping(&self) -> Result<(), UserError> {
        self.repository.ping().await.map_err(UserError::Storage)
    }

    /// Get a single user
    pub async fn get_user(&self, id: UserId) -> Result<UserDto, UserError> {
        self.repository
            .get(id)
            .await?
            .map(UserDto::from)
            .ok_or(UserError::UserNotFound)
    }

    /// Delete a user; a missing id is a failure, not a no-op
    pub async fn delete_user(&self, id: UserId) -> Result<(), UserError> {
        self.repository
            .delete(id)
            .await
            .map_err(UserError::DeleteFailed)?;

        info!(user_id = %id, "User deleted");

        Ok(())
    }

    /// Change a user's username, leaving the email untouched
    pub async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> Result<UserDto, UserError> {
        validate_username(&request.username)?;

        let user = self
            .repository
            .get(id)
            .await?
            .ok_or(UserError::UserNotFound)?;

        self.repository
            .update_username(user.id(), &request.username)
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    UserError::UserAlreadyExists(request.username.clone())
                } else {
                    UserError::UpdateFailed(e)
                }
            })?;

        debug!(user_id = %id, username = %request.username, "Username updated");

        Ok(UserDto {
            id: user.id(),
            username: request.username,
            email: user.email().to_string(),
        })
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Hash(PasswordError::Hash(e.to_string())))?
            .map_err(UserError::Hash)
    }

    async fn verify_placeholder(&self, password: String) {
        let hash = match self
            .placeholder_hash
            .get_or_try_init(|| self.hash_password(PLACEHOLDER_PASSWORD.to_string()))
            .await
        {
            Ok(hash) => hash.clone(),
            Err(e) => {
                warn!(error = %e, "Failed to prepare placeholder hash");
                return;
            }
        };

        let hasher = Arc::clone(&self.hasher);
        let _ = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await;
    }

    async fn verify_password(&self, password: String, user: &User) -> Result<(), UserError> {
        let hasher = Arc::clone(&self.hasher);
        let hash = user.password_hash().to_string();

        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::Hash(PasswordError::Hash(e.to_string())))?;

        match outcome {
            Ok(()) => Ok(()),
            Err(PasswordError::Mismatch) => Err(UserError::InvalidPassword),
            Err(e) => Err(UserError::Hash(e)),
        }
    }
}
