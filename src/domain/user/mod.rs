//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the user entity, its public projection, validation rules,
//! errors and the repository trait.

mod dto;
mod entity;
mod error;
mod repository;
mod validation;

pub use dto::UserDto;
pub use entity::{NewUser, User, UserId};
pub use error::{PasswordError, UserError};
pub use repository::UserRepository;
pub use validation::{
    validate_password, validate_sign_in, validate_sign_up, validate_username,
    UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
