//! Domain layer - Core business types and contracts

pub mod error;
pub mod notification;
pub mod user;

pub use error::DomainError;
pub use notification::Notifier;
pub use user::{NewUser, User, UserDto, UserError, UserId, UserRepository};
