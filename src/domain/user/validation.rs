//! User input validation

use thiserror::Error;

/// Errors that can occur during credential validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

/// Validate the fields required to register
///
/// Fields are checked in order: username, email, password.
pub fn validate_sign_up(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), UserValidationError> {
    validate_username(username)?;

    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    validate_password(password)
}

/// Validate the fields required to sign in
pub fn validate_sign_in(username: &str, password: &str) -> Result<(), UserValidationError> {
    validate_username(username)?;
    validate_password(password)
}

pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_valid() {
        assert!(validate_sign_up("bob", "bob@x.com", "pw123").is_ok());
    }

    #[test]
    fn test_sign_up_reports_first_empty_field() {
        assert_eq!(
            validate_sign_up("", "", ""),
            Err(UserValidationError::EmptyUsername)
        );
        assert_eq!(
            validate_sign_up("bob", "", ""),
            Err(UserValidationError::EmptyEmail)
        );
        assert_eq!(
            validate_sign_up("bob", "bob@x.com", ""),
            Err(UserValidationError::EmptyPassword)
        );
    }

    #[test]
    fn test_sign_in() {
        assert!(validate_sign_in("bob", "pw").is_ok());
        assert_eq!(
            validate_sign_in("", "pw"),
            Err(UserValidationError::EmptyUsername)
        );
        assert_eq!(
            validate_sign_in("bob", ""),
            Err(UserValidationError::EmptyPassword)
        );
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        assert!(validate_username(" ").is_ok());
    }
}
