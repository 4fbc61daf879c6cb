use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::time::Duration;
use tower_http::cors::CorsLayer;

use crate::audit::{AuditEvent, AuditOutcome, extract_user_agent};
use crate::errors::{ErrorCode, ErrorResponse};

/// CORS headers for the single browser origin allowed to call the API.
///
/// Answers preflight for `GET`, `POST` and `OPTIONS` with `Content-Type`,
/// `Authorization` and `Accept` allowed, cached for an hour.
pub fn create_cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// The one origin permitted to send cross-origin requests.
#[derive(Clone, Debug)]
pub struct AllowedOrigin(HeaderValue);

impl AllowedOrigin {
    pub fn new(origin: HeaderValue) -> Self {
        Self(origin)
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.0
    }

    pub fn permits(&self, origin: &HeaderValue) -> bool {
        origin.as_bytes().eq_ignore_ascii_case(self.0.as_bytes())
    }
}

/// Reject requests whose `Origin` header names a different origin.
///
/// `CorsLayer` alone only withholds response headers and leaves the browser
/// to drop the response; this stops the request before the handler runs.
/// Requests without `Origin` (same-origin navigation, curl, server-to-server)
/// pass through.
///
/// ```ignore
/// let origin = AllowedOrigin::new(HeaderValue::from_static("http://localhost:3000"));
/// let app = router
///     .layer(create_cors_layer(origin.header_value().clone()))
///     .layer(middleware::from_fn_with_state(origin, enforce_allowed_origin));
/// ```
pub async fn enforce_allowed_origin(
    State(allowed): State<AllowedOrigin>,
    request: Request,
    next: Next,
) -> Response {
    let rejected = request
        .headers()
        .get(header::ORIGIN)
        .filter(|origin| !allowed.permits(origin))
        .map(|origin| origin.to_str().unwrap_or("<non-ascii>").to_string());

    if let Some(origin) = rejected {
        AuditEvent::new("http.origin_rejected", AuditOutcome::Denied)
            .with_resource(request.uri().path())
            .with_user_agent(extract_user_agent(request.headers()))
            .with_details(serde_json::json!({ "origin": origin }))
            .log();

        return ErrorResponse::new(
            ErrorCode::Forbidden,
            format!("Origin '{}' is not allowed", origin),
        )
        .into_response_with(StatusCode::FORBIDDEN);
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::post};
    use tower::ServiceExt;

    const FRONTEND: &str = "http://localhost:3000";

    fn app() -> Router {
        let origin = AllowedOrigin::new(HeaderValue::from_static(FRONTEND));
        Router::new()
            .route("/echo", post(|| async { "reached" }))
            .layer(create_cors_layer(origin.header_value().clone()))
            .layer(middleware::from_fn_with_state(origin, enforce_allowed_origin))
    }

    fn request(method: Method, origin: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().method(method).uri("/echo");
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_configured_origin_passes_with_cors_headers() {
        let response = app()
            .oneshot(request(Method::POST, Some(FRONTEND)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            FRONTEND
        );
    }

    #[tokio::test]
    async fn test_foreign_origin_is_forbidden() {
        let response = app()
            .oneshot(request(Method::POST, Some("http://evil.example")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_foreign_preflight_is_forbidden() {
        let response = app()
            .oneshot(request(Method::OPTIONS, Some("http://evil.example")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_no_origin_passes() {
        let response = app().oneshot(request(Method::POST, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_permits_ignores_ascii_case() {
        let origin = AllowedOrigin::new(HeaderValue::from_static(FRONTEND));
        assert!(origin.permits(&HeaderValue::from_static("HTTP://LOCALHOST:3000")));
        assert!(!origin.permits(&HeaderValue::from_static("http://localhost:3001")));
    }
}
