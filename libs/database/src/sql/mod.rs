//! Relational store connector and utilities
//!
//! Works with any backend sea-orm was compiled for; the service ships with
//! PostgreSQL and SQLite enabled.

mod config;
mod connector;
mod health;

pub use config::DatabaseConfig;
pub use connector::{
    connect_from_config_with_retry, connect_with_options, prepare_sqlite_path, run_migrations,
};
pub use health::{HealthStatus, check_health, check_health_detailed};

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
