use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::path::PathBuf;
use tracing::info;

use super::DatabaseConfig;
use crate::common::{DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Connect with custom connection options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Connected to database");
    Ok(db)
}

/// Connect from config with exponential backoff; `None` uses [`RetryConfig::default`]
///
/// For SQLite file URLs the parent directory is created first.
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::sql::{DatabaseConfig, connect_from_config_with_retry};
///
/// let config = DatabaseConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, None).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: DatabaseConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    if let Some(dir) = prepare_sqlite_path(config.url()) {
        tokio::fs::create_dir_all(&dir).await?;
    }

    let options = config.into_connect_options();
    let attempt = || connect_with_options(options.clone());

    let db = match retry_config {
        Some(policy) => retry_with_backoff(attempt, policy).await?,
        None => retry(attempt).await?,
    };
    Ok(db)
}

/// Directory that must exist before opening a SQLite file URL
///
/// Returns `None` for non-SQLite URLs, in-memory databases and files in the
/// working directory.
pub fn prepare_sqlite_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path.contains(":memory:") || path.starts_with("file::memory") {
        return None;
    }

    PathBuf::from(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(PathBuf::from)
}

/// Apply every pending migration of `M`
///
/// ```ignore
/// use migration::Migrator;
/// use database::sql::run_migrations;
///
/// run_migrations::<Migrator>(&db, "directory_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
