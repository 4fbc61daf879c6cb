use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{ErrorCode, ErrorResponse};
use thiserror::Error;

use crate::models::Role;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is registered as {registered}, not {requested}")]
    RoleMismatch { registered: Role, requested: Role },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::DuplicateEmail(_) => StatusCode::CONFLICT,
            UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            UserError::RoleMismatch { .. } => StatusCode::FORBIDDEN,
            UserError::Validation(_) => StatusCode::BAD_REQUEST,
            UserError::PasswordHash(_) | UserError::Token(_) | UserError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            UserError::DuplicateEmail(_) => {
                ErrorResponse::new(ErrorCode::Conflict, "Email already registered")
            }
            UserError::InvalidCredentials => {
                ErrorResponse::new(ErrorCode::Unauthorized, "Invalid email or password")
            }
            UserError::RoleMismatch { requested, .. } => ErrorResponse::new(
                ErrorCode::Forbidden,
                format!("Account is not registered with role {}", requested),
            ),
            UserError::Validation(msg) => ErrorResponse::new(ErrorCode::ValidationError, msg.clone()),
            UserError::PasswordHash(msg) | UserError::Token(msg) | UserError::Internal(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "{}: {}", self, msg);
                ErrorResponse::from_code(ErrorCode::InternalError)
            }
        };

        body.into_response_with(status)
    }
}
