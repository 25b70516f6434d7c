use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::db::StoreError;

/// Handler error. Only the favorite-add checks surface as their own status;
/// everything else is a flat 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("Recipe already in favorites")]
    AlreadyFavorite,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("malformed request: {0}")]
    Request(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::Request(r.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        ApiError::Request(r.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::RecipeNotFound => StatusCode::NOT_FOUND,
            ApiError::AlreadyFavorite => StatusCode::BAD_REQUEST,
            other => {
                error!(error = %other, "request failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response();
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
