use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use veranda_domain::{AdminAccount, AdminAccountView};

use super::{ACCOUNTS_TAG, DeleteResponse};
use crate::error::{ApiError, ErrorResponse};
use crate::state::ApiState;

// Accounts never leave the server with their password hash attached;
// every response is narrowed to [`AdminAccountView`].

#[utoipa::path(
    get,
    path = "/api/admin-accounts",
    responses((status = OK, description = "Administrator accounts", body = [AdminAccountView])),
    tag = ACCOUNTS_TAG,
)]
async fn list_admin_accounts(State(state): State<ApiState>) -> Json<Vec<AdminAccountView>> {
    let accounts = state
        .store
        .guarded::<AdminAccount>()
        .list()
        .into_iter()
        .map(AdminAccountView::from)
        .collect();
    Json(accounts)
}

#[utoipa::path(
    post,
    path = "/api/admin-accounts",
    request_body = Value,
    responses(
        (status = CREATED, description = "Created account", body = AdminAccountView),
        (status = BAD_REQUEST, description = "Payload rejected by the sanitizer", body = ErrorResponse),
    ),
    tag = ACCOUNTS_TAG,
)]
async fn create_admin_account(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<AdminAccountView>), ApiError> {
    let created = state.store.guarded::<AdminAccount>().insert(payload).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/admin-accounts/{id}",
    params(("id" = String, Path, description = "Account id")),
    request_body = Value,
    responses(
        (status = OK, description = "Updated account", body = AdminAccountView),
        (status = NOT_FOUND, description = "No account carries this id", body = ErrorResponse),
    ),
    tag = ACCOUNTS_TAG,
)]
async fn update_admin_account(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<AdminAccountView>, ApiError> {
    let patch = AdminAccount::prepare_patch(patch)?;
    let updated = state
        .store
        .guarded::<AdminAccount>()
        .update_by_id(&id, patch)
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/admin-accounts/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = OK, description = "Deletion acknowledged", body = DeleteResponse),
        (
            status = BAD_REQUEST,
            description = "Refused: the delete would remove the last account",
            body = ErrorResponse,
        ),
    ),
    tag = ACCOUNTS_TAG,
)]
async fn delete_admin_account(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state
        .store
        .guarded::<AdminAccount>()
        .delete_by_id(&id)
        .await?;
    Ok(Json(DeleteResponse { success: true }))
}

pub(super) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_admin_accounts, create_admin_account))
        .routes(routes!(update_admin_account, delete_admin_account))
}
