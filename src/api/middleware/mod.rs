//! API middleware components

pub mod logging;
pub mod security;
pub mod user_auth;

pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use security::{security_headers_middleware, MAX_BODY_SIZE};
pub use user_auth::{authenticate, authorize, check_permission, AuthUser, AuthenticatedUser};
