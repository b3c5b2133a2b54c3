//! Directory API: HTTP CRUD over the user directory.
//!
//! The binary in `main.rs` loads [`config::Config`], connects the database and
//! hands an [`state::AppState`] to [`app`].

use axum::Router;
use axum_helpers::{create_router, health_router};
use std::io;

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use state::AppState;

/// Full application router: `/api/*`, docs UIs, `/health` and `/ready`.
pub fn app(state: &AppState) -> io::Result<Router> {
    let api_routes = api::routes(state);
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone())))
}
