use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::plain_text;

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Assigned by the server on creation
    pub id: Uuid,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = 30)]
    pub age: i32,
    #[schema(example = "Pune")]
    pub city: String,
    #[schema(example = "MH")]
    pub state: String,
    #[schema(example = "411001")]
    pub pincode: String,
}

impl User {
    /// Mutable fields of this user
    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            age: self.age,
            city: self.city.clone(),
            state: self.state.clone(),
            pincode: self.pincode.clone(),
        }
    }
}

/// Request body for create and full replace.
///
/// Every field is optional at the JSON level so that a missing field shows up
/// as a `required` violation next to the other violations. An `id` in the
/// body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[validate(
        required(message = "name is required"),
        length(min = 2, max = 100, message = "name must be between 2 and 100 characters"),
        custom(function = "plain_text")
    )]
    #[schema(example = "Alice", min_length = 2, max_length = 100)]
    pub name: Option<String>,

    #[validate(
        required(message = "age is required"),
        range(min = 0, max = 120, message = "age must be between 0 and 120")
    )]
    #[schema(example = 30, minimum = 0, maximum = 120)]
    pub age: Option<i32>,

    #[validate(
        required(message = "city is required"),
        custom(function = "plain_text")
    )]
    #[schema(example = "Pune")]
    pub city: Option<String>,

    #[validate(
        required(message = "state is required"),
        custom(function = "plain_text")
    )]
    #[schema(example = "MH")]
    pub state: Option<String>,

    #[validate(
        required(message = "pincode is required"),
        length(min = 4, max = 10, message = "pincode must be between 4 and 10 characters"),
        custom(function = "plain_text")
    )]
    #[schema(example = "411001", min_length = 4, max_length = 10)]
    pub pincode: Option<String>,
}

/// Well-formed user fields, everything except the identifier.
///
/// Produced by [`crate::validation::validate_payload`]; the service checks the
/// same rules again before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UserFields {
    #[validate(
        length(min = 2, max = 100, message = "name must be between 2 and 100 characters"),
        custom(function = "plain_text")
    )]
    pub name: String,

    #[validate(range(min = 0, max = 120, message = "age must be between 0 and 120"))]
    pub age: i32,

    #[validate(custom(function = "plain_text"))]
    pub city: String,

    #[validate(custom(function = "plain_text"))]
    pub state: String,

    #[validate(
        length(min = 4, max = 10, message = "pincode must be between 4 and 10 characters"),
        custom(function = "plain_text")
    )]
    pub pincode: String,
}

impl UserFields {
    /// Stored user with these fields at `id`
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
        }
    }
}

impl TryFrom<UserPayload> for UserFields {
    type Error = validator::ValidationErrors;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        crate::validation::validate_payload(payload)
    }
}
