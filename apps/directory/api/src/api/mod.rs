use axum::{Router, routing::get};

use crate::state::AppState;

pub mod health;
pub mod users;

/// API routes without the `/api` prefix; `create_router` nests them.
pub fn routes(state: &AppState) -> Router {
    Router::new().merge(users::router(state))
}

/// `/ready` with the database check; merged beside the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
