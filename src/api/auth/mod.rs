//! Authentication API endpoints
//!
//! Sign-up, sign-in and sign-out for JWT-based authentication.

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::Serialize;
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{UserDto, UserError};
use crate::infrastructure::user::{SignInRequest, SignUpRequest};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
}

/// Sign-in response
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: String,
    pub user: UserDto,
}

/// Sign-out response
#[derive(Debug, Serialize)]
pub struct SignOutResponse {
    pub message: String,
}

/// Register a new account
///
/// POST /sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let user = state.user_service.sign_up(request).await?;

    if let Err(e) = state.notifier.send_welcome(&user).await {
        warn!(user_id = %user.id, error = %e, "Failed to send welcome notification");
    }

    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange a username and password for a bearer token
///
/// POST /sign-in
///
/// Unknown users and wrong passwords get the same 401 body, and both pay for
/// one password verification.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    let user = state
        .user_service
        .sign_in(request)
        .await
        .map_err(|e| match e {
            UserError::UserNotFound | UserError::InvalidPassword => {
                ApiError::unauthorized("Invalid username or password")
                    .with_code("invalid_credentials")
            }
            other => other.into(),
        })?;

    let issued = state.jwt_service.generate(&user)?;

    let expires_at = issued
        .claims
        .expires_at()
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();

    info!(user_id = %user.id, "Token issued");

    Ok(Json(SignInResponse {
        token: issued.token,
        token_type: "Bearer",
        expires_at,
        user,
    }))
}

/// Sign out
///
/// POST /sign-out
///
/// Tokens are stateless; the client discards its copy.
pub async fn sign_out() -> Json<SignOutResponse> {
    Json(SignOutResponse {
        message: "Signed out successfully".to_string(),
    })
}
