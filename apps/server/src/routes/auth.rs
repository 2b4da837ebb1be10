use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use veranda_domain::AdminAccount;

use super::AUTH_TAG;
use crate::state::ApiState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Credentials accepted", body = LoginResponse),
        (status = UNAUTHORIZED, description = "Credentials rejected", body = LoginResponse),
    ),
    tag = AUTH_TAG,
)]
async fn login(
    State(state): State<ApiState>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    let accounts = state.store.collection::<AdminAccount>().list();
    let granted = accounts
        .iter()
        .find(|account| account.username == request.username)
        .is_some_and(|account| account.verify_login(&request.password));

    if granted {
        (
            StatusCode::OK,
            Json(LoginResponse { success: true, username: Some(request.username), error: None }),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                username: None,
                error: Some("Invalid username or password".to_string()),
            }),
        )
    }
}

pub(super) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(login))
}
