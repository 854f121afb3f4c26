//! User infrastructure module
//!
//! This module provides implementations for user authentication and management,
//! including password hashing with Argon2, in-memory and SQLite repositories,
//! and the user service.

mod password;
mod repository;
mod service;
mod sqlite_repository;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryUserRepository;
pub use service::{SignInRequest, SignUpRequest, UpdateUserRequest, UserService};
pub use sqlite_repository::SqliteUserRepository;
