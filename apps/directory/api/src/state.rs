//! Shared application state handed to route builders.

use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Cloned into every stateful router; the connection is an internally pooled handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        Self { config, db }
    }
}
