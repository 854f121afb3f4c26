//! Projection of a user that is safe to hand out

use serde::{Deserialize, Serialize};

use super::entity::{User, UserId};

/// User data without the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user() {
        let user = User::new(UserId::new(5), "bob", "bob@x.com", "secret-hash");
        let dto = UserDto::from(&user);

        assert_eq!(dto.id, UserId::new(5));
        assert_eq!(dto.username, "bob");
        assert_eq!(dto.email, "bob@x.com");
    }

    #[test]
    fn test_serialization_has_no_password() {
        let user = User::new(UserId::new(5), "bob", "bob@x.com", "secret-hash");
        let value = serde_json::to_value(UserDto::from(user)).unwrap();

        assert_eq!(value["id"], 5);
        assert_eq!(value["username"], "bob");
        assert_eq!(value["email"], "bob@x.com");
        assert!(value.get("password").is_none());
        assert!(value.get("password_hash").is_none());
        assert!(!value.to_string().contains("secret-hash"));
    }
}
