//! Users Domain
//!
//! Account registration and login for ParkEase.
//!
//! # Features
//!
//! - Registration with Argon2 password hashing
//! - Login with role confirmation (USER, OWNER, ADMIN)
//! - HS256 access tokens
//! - In-memory and PostgreSQL storage
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Password policy, hashing, tokens
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtConfig, JwtIssuer};
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let jwt = JwtConfig::new("a-secret-that-is-at-least-32-chars-long").unwrap();
//! let service = UserService::new(InMemoryUserRepository::new(), JwtIssuer::new(&jwt));
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    AuthResponse, LoginRequest, NewUser, RegisterRequest, Role, User, UserResponse,
    normalize_email,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{AuthService, UserService};
