use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserFields};

/// Sole gateway to user storage.
///
/// Only `NotFound` (update/delete) and `Storage` errors come out of a
/// repository; input is expected to be validated already. Successful
/// mutations are visible to the next `get`/`list` on the same handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user
    async fn list(&self) -> UserResult<Vec<User>>;

    /// `None` when no user has this id
    async fn get(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Store under a fresh identifier and return the stored record
    async fn create(&self, fields: UserFields) -> UserResult<User>;

    /// Replace every field of the user at `id`
    async fn update(&self, id: Uuid, fields: UserFields) -> UserResult<User>;

    async fn delete(&self, id: Uuid) -> UserResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        // v7 ids sort in creation order
        result.sort_by_key(|u| u.id);

        Ok(result)
    }

    async fn get(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, fields: UserFields) -> UserResult<User> {
        let mut users = self.users.write().await;

        let mut id = Uuid::now_v7();
        while users.contains_key(&id) {
            id = Uuid::now_v7();
        }

        let user = fields.into_user(id);
        users.insert(id, user.clone());

        tracing::info!(user_id = %id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: Uuid, fields: UserFields) -> UserResult<User> {
        let mut users = self.users.write().await;

        let slot = users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        *slot = fields.into_user(id);

        tracing::info!(user_id = %id, "Updated user");
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let mut users = self.users.write().await;

        users.remove(&id).ok_or(UserError::NotFound(id))?;

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
