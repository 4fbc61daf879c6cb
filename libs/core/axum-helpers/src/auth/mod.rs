//! Access-token issuance.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, JwtIssuer};
//! use core_config::FromEnv;
//!
//! let issuer = JwtIssuer::new(&JwtConfig::from_env()?);
//! let token = issuer.create_access_token("42", "ana@x.com", "Ana", "USER")?;
//! ```

pub mod config;
pub mod jwt;

pub use config::JwtConfig;
pub use jwt::{JwtClaims, JwtIssuer};
