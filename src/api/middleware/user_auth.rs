//! Bearer token authentication and ownership checks for user routes

use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::UserId;

/// Identity carried by a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
}

/// Validate the bearer token and attach the caller's identity to the request
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_token(request.headers())?;

    let claims = state.jwt_service.validate(&token).map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        ApiError::unauthorized("Invalid or expired token").with_code("invalid_token")
    })?;

    let user = AuthenticatedUser {
        id: claims.user_id()?,
        username: claims.username,
    };

    debug!(user_id = %user.id, "Request authenticated");

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Allow the request only when the `{id}` path segment is the caller's own id
///
/// Must run after [`authenticate`].
pub async fn check_permission(
    Path(raw_id): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let target: UserId = raw_id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid user id").with_param("id"))?;

    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    authorize(user, target)?;

    Ok(next.run(request).await)
}

/// Ownership rule: callers may only act on their own account
pub fn authorize(user: &AuthenticatedUser, target: UserId) -> Result<(), ApiError> {
    if user.id == target {
        Ok(())
    } else {
        debug!(user_id = %user.id, target = %target, "Permission denied");
        Err(ApiError::forbidden("You may only access your own account").with_code("forbidden"))
    }
}

/// Extractor for the identity attached by [`authenticate`]
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Extract JWT token from Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
    )
    .with_code("missing_token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn user(id: i64) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(id),
            username: format!("user{}", id),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer eyJhbGciOiJIUzI1NiJ9.test".parse().unwrap(),
        );

        let result = extract_jwt_token(&headers);
        assert_eq!(result.unwrap(), "eyJhbGciOiJIUzI1NiJ9.test");
    }

    #[test]
    fn test_missing_token() {
        let headers = HeaderMap::new();

        let err = extract_jwt_token(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_auth_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        let err = extract_jwt_token(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_empty_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer    ".parse().unwrap());

        assert!(extract_jwt_token(&headers).is_err());
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   token-with-spaces   ".parse().unwrap(),
        );

        let result = extract_jwt_token(&headers);
        assert_eq!(result.unwrap(), "token-with-spaces");
    }

    #[test]
    fn test_authorize_own_account() {
        assert!(authorize(&user(3), UserId::new(3)).is_ok());
    }

    #[test]
    fn test_authorize_other_account_is_forbidden() {
        let err = authorize(&user(3), UserId::new(4)).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
