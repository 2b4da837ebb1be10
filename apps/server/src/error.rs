//! Maps domain and infrastructure failures onto HTTP responses.
//!
//! Client-caused failures (validation, invariant, unknown id, unusable
//! upload) surface their message in the body. Everything else is logged
//! server-side and masked behind a generic 500 so internals never leak.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;
use veranda_media::MediaError;
use veranda_store::StoreError;

/// Error payload returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    Media(MediaError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        Self::Media(err)
    }
}

/// Shorthand for client errors raised at the HTTP boundary itself.
pub(crate) fn bad_request(message: impl Into<Cow<'static, str>>) -> ApiError {
    ApiError::Store(StoreError::Validation { message: message.into(), context: None })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::Store(
                StoreError::Validation { message, .. } | StoreError::Invariant { message, .. },
            ) => (StatusCode::BAD_REQUEST, message.into_owned()),
            Self::Store(StoreError::NotFound { message, .. }) => {
                (StatusCode::NOT_FOUND, message.into_owned())
            }
            Self::Media(
                MediaError::TooLarge { message, .. } | MediaError::UnsupportedType { message, .. },
            ) => (StatusCode::BAD_REQUEST, message.into_owned()),
            Self::Store(err) => {
                error!(%err, "Storage failure while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            Self::Media(err) => {
                error!(%err, "Upload failure while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_client_failures_map_to_4xx() {
        let validation = StoreError::Validation { message: "bad".into(), context: None };
        assert_eq!(status_of(validation.into()), StatusCode::BAD_REQUEST);

        let invariant = StoreError::Invariant {
            message: "cannot delete the last remaining room type".into(),
            context: None,
        };
        assert_eq!(status_of(invariant.into()), StatusCode::BAD_REQUEST);

        let missing = StoreError::NotFound { message: "room abc does not exist".into(), context: None };
        assert_eq!(status_of(missing.into()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_infrastructure_failures_are_masked() {
        let io = StoreError::Io { source: std::io::Error::other("disk on fire"), context: None };
        let response = ApiError::from(io).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upload_rejections_are_client_errors() {
        let too_large = MediaError::TooLarge { message: "too big".into(), context: None };
        assert_eq!(status_of(too_large.into()), StatusCode::BAD_REQUEST);

        let wrong_type = MediaError::UnsupportedType { message: "no".into(), context: None };
        assert_eq!(status_of(wrong_type.into()), StatusCode::BAD_REQUEST);
    }
}
