use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "ParkEase API",
        version = "0.1.0",
        description = "Registration and login for the ParkEase parking platform"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/auth", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_paths_nested() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/auth/register"));
        assert!(doc.paths.paths.contains_key("/auth/login"));
    }
}
