//! HTTP surface of the API, one module per resource family.
//!
//! The repetitive four-endpoint shape of a collection resource (list,
//! create, update by id, delete by id) is stamped out by
//! `collection_routes!`; singletons get `section_routes!`. Resources
//! with extra behavior (guarded deletes, credential projection, bulk
//! replace) write their handlers by hand.

use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::state::ApiState;

pub(crate) const SYSTEM_TAG: &str = "system";
pub(crate) const AUTH_TAG: &str = "auth";
pub(crate) const BOOKINGS_TAG: &str = "bookings";
pub(crate) const ROOMS_TAG: &str = "rooms";
pub(crate) const ACCOUNTS_TAG: &str = "accounts";
pub(crate) const CONTENT_TAG: &str = "content";
pub(crate) const SECTIONS_TAG: &str = "sections";
pub(crate) const MEDIA_TAG: &str = "media";
pub(crate) const SITE_TAG: &str = "site";

/// Acknowledgement returned by every delete endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct DeleteResponse {
    pub success: bool,
}

/// Stamps out the four standard endpoints of one collection resource and
/// a router function wiring them up.
macro_rules! collection_routes {
    (
        entity: $entity:ty,
        tag: $tag:expr,
        path: $path:literal,
        item_path: $item_path:literal,
        router: $router:ident,
        list: $list:ident,
        create: $create:ident,
        update: $update:ident,
        delete: $delete:ident $(,)?
    ) => {
        #[utoipa::path(
            get,
            path = $path,
            responses((status = OK, description = "Full ordered collection", body = [$entity])),
            tag = $tag,
        )]
        async fn $list(
            axum::extract::State(state): axum::extract::State<crate::state::ApiState>,
        ) -> axum::Json<Vec<$entity>> {
            axum::Json(state.store.collection::<$entity>().list())
        }

        #[utoipa::path(
            post,
            path = $path,
            request_body = serde_json::Value,
            responses(
                (status = CREATED, description = "Created entity", body = $entity),
                (
                    status = BAD_REQUEST,
                    description = "Payload rejected by the sanitizer",
                    body = crate::error::ErrorResponse,
                ),
            ),
            tag = $tag,
        )]
        async fn $create(
            axum::extract::State(state): axum::extract::State<crate::state::ApiState>,
            axum::Json(payload): axum::Json<serde_json::Value>,
        ) -> Result<(axum::http::StatusCode, axum::Json<$entity>), crate::error::ApiError> {
            let created = state.store.collection::<$entity>().insert(payload).await?;
            Ok((axum::http::StatusCode::CREATED, axum::Json(created)))
        }

        #[utoipa::path(
            put,
            path = $item_path,
            params(("id" = String, Path, description = "Entity id")),
            request_body = serde_json::Value,
            responses(
                (status = OK, description = "Updated entity", body = $entity),
                (
                    status = NOT_FOUND,
                    description = "No entity carries this id",
                    body = crate::error::ErrorResponse,
                ),
            ),
            tag = $tag,
        )]
        async fn $update(
            axum::extract::State(state): axum::extract::State<crate::state::ApiState>,
            axum::extract::Path(id): axum::extract::Path<String>,
            axum::Json(patch): axum::Json<serde_json::Value>,
        ) -> Result<axum::Json<$entity>, crate::error::ApiError> {
            let updated = state.store.collection::<$entity>().update_by_id(&id, patch).await?;
            Ok(axum::Json(updated))
        }

        #[utoipa::path(
            delete,
            path = $item_path,
            params(("id" = String, Path, description = "Entity id")),
            responses((
                status = OK,
                description = "Deletion acknowledged; absent ids are a success",
                body = crate::routes::DeleteResponse,
            )),
            tag = $tag,
        )]
        async fn $delete(
            axum::extract::State(state): axum::extract::State<crate::state::ApiState>,
            axum::extract::Path(id): axum::extract::Path<String>,
        ) -> Result<axum::Json<crate::routes::DeleteResponse>, crate::error::ApiError> {
            state.store.collection::<$entity>().delete_by_id(&id).await?;
            Ok(axum::Json(crate::routes::DeleteResponse { success: true }))
        }

        pub(crate) fn $router() -> utoipa_axum::router::OpenApiRouter<crate::state::ApiState> {
            utoipa_axum::router::OpenApiRouter::new()
                .routes(utoipa_axum::routes!($list, $create))
                .routes(utoipa_axum::routes!($update, $delete))
        }
    };
}

/// Stamps out the get/merge endpoint pair of one singleton section and a
/// router function wiring them up.
macro_rules! section_routes {
    (
        section: $section:ty,
        tag: $tag:expr,
        path: $path:literal,
        router: $router:ident,
        get: $get:ident,
        update: $update:ident $(,)?
    ) => {
        #[utoipa::path(
            get,
            path = $path,
            responses((status = OK, description = "Current section content", body = $section)),
            tag = $tag,
        )]
        async fn $get(
            axum::extract::State(state): axum::extract::State<crate::state::ApiState>,
        ) -> axum::Json<$section> {
            axum::Json(state.store.singleton::<$section>().get())
        }

        #[utoipa::path(
            put,
            path = $path,
            request_body = serde_json::Value,
            responses(
                (status = OK, description = "Merged section content", body = $section),
                (
                    status = BAD_REQUEST,
                    description = "Patch does not fit the section",
                    body = crate::error::ErrorResponse,
                ),
            ),
            tag = $tag,
        )]
        async fn $update(
            axum::extract::State(state): axum::extract::State<crate::state::ApiState>,
            axum::Json(patch): axum::Json<serde_json::Value>,
        ) -> Result<axum::Json<$section>, crate::error::ApiError> {
            let merged = state.store.singleton::<$section>().update(patch).await?;
            Ok(axum::Json(merged))
        }

        pub(crate) fn $router() -> utoipa_axum::router::OpenApiRouter<crate::state::ApiState> {
            utoipa_axum::router::OpenApiRouter::new()
                .routes(utoipa_axum::routes!($get, $update))
        }
    };
}

mod accounts;
mod auth;
mod bookings;
mod content;
mod health;
mod landing;
mod media;
mod rooms;
mod sections;

pub(crate) fn api_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(health::health_handler))
        .merge(auth::router())
        .merge(bookings::router())
        .merge(rooms::router())
        .merge(accounts::router())
        .merge(content::router())
        .merge(sections::router())
        .merge(landing::router())
        .merge(media::router())
}
