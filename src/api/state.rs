//! Application state for shared services

use std::sync::Arc;

use crate::domain::notification::Notifier;
use crate::domain::user::{UserDto, UserError, UserId, UserRepository};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::user::{
    PasswordHasher, SignInRequest, SignUpRequest, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    pub notifier: Arc<dyn Notifier>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn sign_up(&self, request: SignUpRequest) -> Result<UserDto, UserError>;
    async fn sign_in(&self, request: SignInRequest) -> Result<UserDto, UserError>;
    async fn get_users(&self) -> Result<Vec<UserDto>, UserError>;
    async fn ping(&self) -> Result<(), UserError>;
    async fn get_user(&self, id: UserId) -> Result<UserDto, UserError>;
    async fn delete_user(&self, id: UserId) -> Result<(), UserError>;
    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> Result<UserDto, UserError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<UserDto, UserError> {
        UserService::sign_up(self, request).await
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<UserDto, UserError> {
        UserService::sign_in(self, request).await
    }

    async fn get_users(&self) -> Result<Vec<UserDto>, UserError> {
        UserService::get_users(self).await
    }

    async fn ping(&self) -> Result<(), UserError> {
        UserService::ping(self).await
    }

    async fn get_user(&self, id: UserId) -> Result<UserDto, UserError> {
        UserService::get_user(self, id).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserError> {
        UserService::delete_user(self, id).await
    }

    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> Result<UserDto, UserError> {
        UserService::update_user(self, id, request).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            user_service,
            jwt_service,
            notifier,
        }
    }
}
