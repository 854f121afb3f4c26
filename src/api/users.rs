//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, put},
    Router,
};
use serde::Serialize;
use tracing::info;

use crate::api::middleware::{authenticate, check_permission, AuthUser};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{UserDto, UserId};
use crate::infrastructure::user::UpdateUserRequest;

/// Create the user router; every `{id}` route requires the owner's token
pub fn create_users_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/update/{id}", put(update_user))
        .route_layer(middleware::from_fn(check_permission))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/users", get(list_users))
        .merge(protected)
}

/// List users response
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserDto>,
    pub total: usize,
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<ListUsersResponse>, ApiError> {
    let users = state.user_service.get_users().await?;
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// PUT /users/update/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.user_service.update_user(id, request).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete_user(id).await?;

    info!(user_id = %id, username = %caller.username, "Account closed by owner");

    Ok(StatusCode::NO_CONTENT)
}
