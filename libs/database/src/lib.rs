//! PostgreSQL connectivity for ParkEase services.
//!
//! Wraps SeaORM connection setup with env-driven pool configuration,
//! startup retry with exponential backoff, migration running and a
//! readiness health check.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "parkease_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
