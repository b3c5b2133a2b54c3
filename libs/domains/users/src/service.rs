use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserFields};
use crate::repository::UserRepository;

/// Use cases over a [`UserRepository`].
///
/// Fields are validated again here so callers that skip the HTTP layer get
/// the same rules.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn create_user(&self, fields: UserFields) -> UserResult<User> {
        fields.validate()?;
        self.repository.create(fields).await
    }

    /// Full replace of the user at `id`
    pub async fn update_user(&self, id: Uuid, fields: UserFields) -> UserResult<User> {
        fields.validate()?;
        self.repository.update(id, fields).await
    }

    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        self.repository.delete(id).await
    }
}
