use axum::Router;
use domain_users::{SqlUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = SqlUserRepository::new(state.db.clone());
    let service = UserService::new(repository);
    handlers::router(service)
}
