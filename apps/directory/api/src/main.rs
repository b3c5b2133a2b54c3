use core_config::tracing::{init_tracing, install_color_eyre};
use database::sql::{connect_from_config_with_retry, run_migrations};
use directory_api::{app, config::Config, state::AppState};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    if config.database.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    } else {
        info!("DB_RUN_MIGRATIONS=false, skipping migrations");
    }

    let state = AppState::new(config, db);
    let router = app(&state)?;

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        address = %state.config.server.address(),
        "Starting directory API"
    );

    let server_config = state.config.server.clone();
    axum_helpers::serve(router, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        match state.db.close().await {
            Ok(()) => info!("Database connection closed"),
            Err(e) => tracing::error!("Error closing database connection: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Directory API shutdown complete");
    Ok(())
}
