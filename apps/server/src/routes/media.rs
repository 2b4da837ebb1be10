use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use super::MEDIA_TAG;
use crate::error::{ApiError, ErrorResponse, bad_request};
use crate::state::ApiState;

/// Public URL of a stored upload, served under `/uploads`.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UploadResponse {
    url: String,
}

#[utoipa::path(
    post,
    path = "/api/uploads",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = OK, description = "Stored image", body = UploadResponse),
        (
            status = BAD_REQUEST,
            description = "Missing file field, non-image content type or oversized file",
            body = ErrorResponse,
        ),
    ),
    tag = MEDIA_TAG,
)]
async fn upload(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| bad_request(err.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| bad_request(err.body_text()))?;
        let stored = state.media.store(&content_type, &bytes).await?;
        return Ok(Json(UploadResponse { url: stored.url }));
    }
    Err(bad_request("Upload must include a `file` field"))
}

pub(super) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(upload))
}
