use utoipa::OpenApi;

/// Aggregated API documentation for the service
#[derive(OpenApi)]
#[openapi(
    nest(
        (path = "/users", api = domain_users::ApiDoc)
    ),
    info(title = "User API", description = "CRUD backend for the user resource")
)]
pub struct ApiDoc;
