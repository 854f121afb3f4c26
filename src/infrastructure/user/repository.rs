//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct UserTable {
    users: BTreeMap<i64, User>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, i64>,
    last_id: i64,
}

/// In-memory implementation of UserRepository
///
/// Ids are assigned from a counter starting at 1 and never reused.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.username_index.contains_key(&user.username) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        table.last_id += 1;
        let id = table.last_id;
        let created = user.into_user(UserId::new(id));

        table
            .username_index
            .insert(created.username().to_string(), id);
        table.users.insert(id, created.clone());

        Ok(created)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(&id.value()).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .username_index
            .get(username)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.values().cloned().collect())
    }

    async fn update_username(&self, id: UserId, username: &str) -> Result<(), DomainError> {
        let mut table = self.table.write().await;

        let old_username = match table.users.get(&id.value()) {
            Some(user) => user.username().to_string(),
            None => return Err(DomainError::not_found(format!("User '{}' not found", id))),
        };

        if old_username == username {
            return Ok(());
        }

        if table.username_index.contains_key(username) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        table.username_index.remove(&old_username);
        table
            .username_index
            .insert(username.to_string(), id.value());

        if let Some(user) = table.users.get_mut(&id.value()) {
            user.set_username(username);
        }

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let mut table = self.table.write().await;

        match table.users.remove(&id.value()) {
            Some(user) => {
                table.username_index.remove(user.username());
                Ok(())
            }
            None => Err(DomainError::not_found(format!("User '{}' not found", id))),
        }
    }
}
