//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries.
//!
//! - **[`server`]**: router assembly with API docs, health endpoints, graceful shutdown
//! - **[`http`]**: security headers and CORS
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: UUID path and validated JSON extractors
//! - **[`audit`]**: audit events for data modifications
//!
//! ```ignore
//! use axum_helpers::server::{create_router, serve};
//! use core_config::server::ServerConfig;
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes, &config)?;
//! serve(router, &config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, create_router,
    health_router, run_health_checks, serve, shutdown_signal,
};

pub use http::{cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, ClientInfo};
