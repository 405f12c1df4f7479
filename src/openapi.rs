//! OpenAPI document for the blog API.

use std::sync::OnceLock;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Blog",
        version = env!("CARGO_PKG_VERSION"),
        description = "Blog posts and their lifecycle statuses."
    ),
    paths(
        crate::routes::common::root,
        crate::routes::common::health,
        crate::routes::common::ready,
        crate::routes::common::version,
        crate::routes::docs::get_openapi_json,
        crate::handlers::status::list_statuses,
        crate::handlers::status::create_status,
        crate::handlers::blog::list_blogs,
        crate::handlers::blog::get_blog,
        crate::handlers::blog::create_blog,
        crate::handlers::blog::update_blog,
        crate::handlers::blog::delete_blog,
        crate::handlers::publication::list_published,
        crate::handlers::publication::search_published,
    ),
    components(
        schemas(
            crate::model::Status,
            crate::model::NewStatus,
            crate::model::Blog,
            crate::model::BlogWithStatus,
            crate::model::NewBlog,
            crate::model::BlogChanges,
            crate::publication::PublishedBlog,
            crate::error::ErrorBody,
            crate::response::MessageBody,
        )
    ),
    tags(
        (name = "Common", description = "Liveness, readiness and metadata"),
        (name = "Status", description = "Blog lifecycle statuses"),
        (name = "Blogs", description = "Blog CRUD"),
        (name = "Published", description = "Published blogs, reduced projection"),
        (name = "OpenAPI", description = "This document"),
    ),
)]
pub struct ApiDoc;

static OPENAPI_JSON_CACHE: OnceLock<String> = OnceLock::new();

/// The generated document serialized as pretty JSON, rendered once.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    if let Some(spec) = OPENAPI_JSON_CACHE.get() {
        return Ok(spec.clone());
    }
    let spec = serde_json::to_string_pretty(&ApiDoc::openapi())?;
    let _ = OPENAPI_JSON_CACHE.set(spec.clone());
    Ok(spec)
}
