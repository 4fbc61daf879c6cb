pub mod codes;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every non-2xx response.
///
/// ```json
/// {
///   "code": 1008,
///   "error": "CONFLICT",
///   "message": "Email already registered",
///   "details": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Structured details, e.g. per-field validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Envelope carrying the code's default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Render with the given status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Body could not be extracted as JSON. Keeps axum's status (400, 415 or 422).
pub fn json_rejection_response(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    tracing::warn!(
        error_code = ErrorCode::JsonExtraction.code(),
        %status,
        "JSON extraction failed: {}",
        rejection.body_text()
    );
    ErrorResponse::new(ErrorCode::JsonExtraction, rejection.body_text()).into_response_with(status)
}

/// Field validation failed; details maps field name to its failures.
pub fn validation_response(errors: &ValidationErrors) -> Response {
    tracing::info!(
        error_code = ErrorCode::ValidationError.code(),
        "Validation error: {}",
        errors
    );

    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let entries: Vec<serde_json::Value> = errs
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    ErrorResponse::from_code(ErrorCode::ValidationError)
        .with_details(serde_json::Value::Object(details))
        .into_response_with(StatusCode::BAD_REQUEST)
}
