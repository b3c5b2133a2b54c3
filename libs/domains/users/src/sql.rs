use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{User, UserFields},
    repository::UserRepository,
};

/// sea-orm backed repository (PostgreSQL or SQLite).
///
/// Statements avoid `RETURNING`, so every backend sea-orm supports behaves
/// the same.
#[derive(Clone)]
pub struct SqlUserRepository {
    db: DatabaseConnection,
}

impl SqlUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        tracing::debug!(count = models.len(), "Listed users");
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn create(&self, fields: UserFields) -> UserResult<User> {
        let id = Uuid::now_v7();
        let user = fields.clone().into_user(id);

        entity::Entity::insert(entity::ActiveModel::new_user(id, fields))
            .exec_without_returning(&self.db)
            .await?;

        tracing::info!(user_id = %id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: Uuid, fields: UserFields) -> UserResult<User> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Name, Expr::value(fields.name.clone()))
            .col_expr(entity::Column::Age, Expr::value(fields.age))
            .col_expr(entity::Column::City, Expr::value(fields.city.clone()))
            .col_expr(entity::Column::State, Expr::value(fields.state.clone()))
            .col_expr(entity::Column::Pincode, Expr::value(fields.pincode.clone()))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "Updated user");
        Ok(fields.into_user(id))
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
