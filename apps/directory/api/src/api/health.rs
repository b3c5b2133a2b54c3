//! Readiness backed by a database ping.

use axum::{Json, extract::State, http::StatusCode};
use axum_helpers::{HealthCheckFuture, ReadyResponse, run_health_checks};
use database::sql::check_health_detailed;

use crate::state::AppState;

pub async fn ready_handler(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            let status = check_health_detailed(&state.db).await;
            tracing::debug!(response_time_ms = status.response_time_ms, "Database ping");

            if status.healthy {
                Ok(())
            } else {
                Err(status
                    .message
                    .unwrap_or_else(|| "database unreachable".to_string()))
            }
        }),
    )];

    run_health_checks(checks).await
}
