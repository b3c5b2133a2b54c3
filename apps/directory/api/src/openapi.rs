use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse, axum_helpers::ErrorCode)),
    info(
        title = "Directory API",
        version = "0.1.0",
        description = "Create, read, replace and delete user directory records"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
struct BaseDoc;

/// Document served by the docs UIs: base info plus every domain's paths.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_users::handlers::ApiDoc::openapi());
        doc
    }
}
