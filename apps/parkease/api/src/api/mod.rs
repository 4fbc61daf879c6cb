//! API routes module

pub mod health;

use axum::Router;
use axum_helpers::JwtIssuer;
use domain_users::{PgUserRepository, UserService, handlers};

use crate::state::AppState;

/// Routes served under `/api`
pub fn routes(state: &AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository, JwtIssuer::new(&state.config.jwt));

    Router::new().nest("/auth", handlers::router(service))
}
