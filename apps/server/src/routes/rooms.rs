use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use veranda_domain::{ManagedRoom, RoomType};

use super::{DeleteResponse, ROOMS_TAG};
use crate::error::{ApiError, ErrorResponse};
use crate::state::ApiState;

collection_routes! {
    entity: ManagedRoom,
    tag: ROOMS_TAG,
    path: "/api/rooms",
    item_path: "/api/rooms/{id}",
    router: room_routes,
    list: list_rooms,
    create: create_room,
    update: update_room,
    delete: delete_room,
}

// Room types go through the guarded repository: rooms reference the
// catalogue by id, so it must never be emptied.

#[utoipa::path(
    get,
    path = "/api/room-types",
    responses((status = OK, description = "Room type catalogue", body = [RoomType])),
    tag = ROOMS_TAG,
)]
async fn list_room_types(State(state): State<ApiState>) -> Json<Vec<RoomType>> {
    Json(state.store.guarded::<RoomType>().list())
}

#[utoipa::path(
    post,
    path = "/api/room-types",
    request_body = Value,
    responses(
        (status = CREATED, description = "Created room type", body = RoomType),
        (status = BAD_REQUEST, description = "Payload rejected by the sanitizer", body = ErrorResponse),
    ),
    tag = ROOMS_TAG,
)]
async fn create_room_type(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<RoomType>), ApiError> {
    let created = state.store.guarded::<RoomType>().insert(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/room-types/{id}",
    params(("id" = String, Path, description = "Room type id")),
    request_body = Value,
    responses(
        (status = OK, description = "Updated room type", body = RoomType),
        (status = NOT_FOUND, description = "No room type carries this id", body = ErrorResponse),
    ),
    tag = ROOMS_TAG,
)]
async fn update_room_type(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<RoomType>, ApiError> {
    let updated = state.store.guarded::<RoomType>().update_by_id(&id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/room-types/{id}",
    params(("id" = String, Path, description = "Room type id")),
    responses(
        (status = OK, description = "Deletion acknowledged", body = DeleteResponse),
        (
            status = BAD_REQUEST,
            description = "Refused: the delete would empty the catalogue",
            body = ErrorResponse,
        ),
    ),
    tag = ROOMS_TAG,
)]
async fn delete_room_type(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.store.guarded::<RoomType>().delete_by_id(&id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

pub(super) fn router() -> OpenApiRouter<ApiState> {
    room_routes()
        .routes(routes!(list_room_types, create_room_type))
        .routes(routes!(update_room_type, delete_room_type))
}
