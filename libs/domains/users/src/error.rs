use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with id {0} not found")]
    NotFound(Uuid),

    #[error("Invalid user: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Storage fault: {0}")]
    Storage(#[from] DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User with id {} not found", id)),
            UserError::Validation(errors) => AppError::ValidationError(errors),
            UserError::Storage(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
