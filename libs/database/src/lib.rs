//! Relational database plumbing shared by the service binaries and tests.
//!
//! - [`sql`]: connection configuration, connect-with-retry, migrations and
//!   health checks for any sea-orm backend (PostgreSQL or SQLite)
//! - [`common`]: the unified [`DatabaseError`] and the retry helpers
//!
//! # Example
//!
//! ```ignore
//! use database::sql::{self, DatabaseConfig};
//! use migration::Migrator;
//!
//! let config = DatabaseConfig::new("sqlite://data/app.db?mode=rwc");
//! let db = sql::connect_from_config_with_retry(config, None).await?;
//! sql::run_migrations::<Migrator>(&db, "directory_api").await?;
//! ```

pub mod common;
pub mod sql;

pub use common::{DatabaseError, DatabaseResult};
