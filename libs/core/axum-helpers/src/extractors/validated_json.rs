//! JSON extractor that runs `validator` rules before the handler sees the body.

use crate::errors::{json_rejection_response, validation_response};
use axum::{
    extract::{FromRequest, Json, Request},
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has been deserialized and validated.
///
/// Rejections use the standard error envelope:
/// - body missing a required field or carrying a wrong type: 422 `JSON_EXTRACTION`
/// - syntactically broken JSON: 400 `JSON_EXTRACTION`
/// - missing `Content-Type: application/json`: 415 `JSON_EXTRACTION`
/// - `Validate` failure: 400 `VALIDATION_ERROR` with per-field details
///
/// ```ignore
/// async fn register(ValidatedJson(req): ValidatedJson<RegisterRequest>) -> impl IntoResponse { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_response)?;

        data.validate().map_err(|e| validation_response(&e))?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1))]
        name: String,
    }

    async fn echo(ValidatedJson(probe): ValidatedJson<Probe>) -> String {
        probe.name
    }

    async fn send(body: &str, content_type: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        Router::new()
            .route("/", post(echo))
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        assert_eq!(send(r#"{"name":"Ana"}"#, Some("application/json")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_is_unprocessable() {
        assert_eq!(
            send("{}", Some("application/json")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_broken_json_is_bad_request() {
        assert_eq!(send("{", Some("application/json")).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported() {
        assert_eq!(
            send(r#"{"name":"Ana"}"#, None).await,
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[tokio::test]
    async fn test_validation_failure_is_bad_request() {
        assert_eq!(
            send(r#"{"name":""}"#, Some("application/json")).await,
            StatusCode::BAD_REQUEST
        );
    }
}
