use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{User, UserFields};

/// Sea-ORM entity for the `users` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            age: model.age,
            city: model.city,
            state: model.state,
            pincode: model.pincode,
        }
    }
}

impl ActiveModel {
    /// Row for a new user with identifier `id`
    pub fn new_user(id: Uuid, fields: UserFields) -> Self {
        Self {
            id: Set(id),
            name: Set(fields.name),
            age: Set(fields.age),
            city: Set(fields.city),
            state: Set(fields.state),
            pincode: Set(fields.pincode),
        }
    }
}
