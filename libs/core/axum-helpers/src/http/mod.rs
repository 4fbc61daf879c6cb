//! HTTP middleware: CORS, origin guard and security headers.
//!
//! ```ignore
//! use axum_helpers::http::{AllowedOrigin, create_cors_layer, enforce_allowed_origin, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(origin.header_value().clone()))
//!     .layer(axum::middleware::from_fn_with_state(origin, enforce_allowed_origin));
//! ```

pub mod cors;
pub mod security;

pub use cors::{AllowedOrigin, create_cors_layer, enforce_allowed_origin};
pub use security::security_headers;
