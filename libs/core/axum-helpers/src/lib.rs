//! # Axum Helpers
//!
//! Shared HTTP plumbing for ParkEase services.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT access-token issuance and verification
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS, origin guard, security headers
//! - **[`errors`]**: The JSON error envelope and its error codes
//! - **[`extractors`]**: `ValidatedJson`
//! - **[`audit`]**: Audit logging for authentication events
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new(), &CorsConfig::default())?
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{JwtClaims, JwtConfig, JwtIssuer};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{AllowedOrigin, create_cors_layer, enforce_allowed_origin, security_headers};

pub use errors::{ErrorCode, ErrorResponse};

pub use extractors::ValidatedJson;

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
