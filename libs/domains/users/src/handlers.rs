use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
use axum_helpers::{
    AuditEvent, AuditOutcome, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, UnauthorizedResponse, UnprocessableEntityResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    AuthResponse, LoginRequest, RegisterRequest, Role, UserResponse, normalize_email,
};
use crate::service::AuthService;

pub const TAG: &str = "auth";

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(
        schemas(RegisterRequest, LoginRequest, AuthResponse, UserResponse, Role),
        responses(
            BadRequestValidationResponse,
            UnprocessableEntityResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Registration and login")
    )
)]
pub struct ApiDoc;

/// Create the auth router: `POST /register` and `POST /login`
pub fn router<S: AuthService>(service: S) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register::<S>))
        .route("/login", post(login::<S>))
        .with_state(shared_service)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created and signed in", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<S: AuthService>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<Json<AuthResponse>> {
    let subject = normalize_email(&input.email);
    let result = service.register_user(input).await;

    audit("auth.register", subject, &headers, &result);
    result.map(Json)
}

/// Sign in with email, password and role
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<S: AuthService>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let subject = normalize_email(&input.email);
    let result = service.login_user(input).await;

    audit("auth.login", subject, &headers, &result);
    result.map(Json)
}

fn audit(action: &str, subject: String, headers: &HeaderMap, result: &UserResult<AuthResponse>) {
    let (outcome, details) = match result {
        Ok(auth) => (
            AuditOutcome::Success,
            json!({ "user_id": auth.user.id, "role": auth.user.role.to_string() }),
        ),
        Err(UserError::RoleMismatch {
            registered,
            requested,
        }) => (
            AuditOutcome::Denied,
            json!({
                "reason": "role_mismatch",
                "registered": registered.to_string(),
                "requested": requested.to_string(),
            }),
        ),
        Err(UserError::InvalidCredentials) => (
            AuditOutcome::Denied,
            json!({ "reason": "invalid_credentials" }),
        ),
        Err(UserError::DuplicateEmail(_)) => (
            AuditOutcome::Failure,
            json!({ "reason": "duplicate_email" }),
        ),
        Err(UserError::Validation(_)) => (
            AuditOutcome::Failure,
            json!({ "reason": "validation" }),
        ),
        Err(_) => (AuditOutcome::Failure, json!({ "reason": "internal" })),
    };

    AuditEvent::new(action, outcome)
        .with_subject(Some(subject))
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .with_details(details)
        .log();
}
