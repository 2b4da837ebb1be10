use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

use crate::routes;
use crate::state::ApiState;

/// Headroom on top of the upload ceiling for the multipart envelope, so a
/// file exactly at the ceiling still fits in the request body.
const BODY_LIMIT_ENVELOPE: usize = 16 * 1024;

#[derive(OpenApi)]
struct ApiDoc;

pub(crate) fn init(state: ApiState) -> Router {
    let uploads_root = state.media.root().to_path_buf();
    let body_limit = state.config.storage.upload_limit_bytes + BODY_LIMIT_ENVELOPE;

    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(routes::api_router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    // Create the Scalar UI routes
    let scalar_routes = Scalar::with_url("/api", api_doc);

    // Merge all routes, then hang the upload directory off /uploads
    Router::new()
        .merge(openapi_routes)
        .merge(scalar_routes)
        .nest_service("/uploads", ServeDir::new(uploads_root))
}
