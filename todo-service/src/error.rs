//! HTTP-facing error type.
//!
//! Every variant renders as a `{status: "failure", message}` envelope.
//! Storage failures are logged in full but reported to the client with a
//! generic message.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::Message;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Id invalid")]
    InvalidId,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Todo not found!")]
    NotFound,

    #[error("Todo update failure!")]
    UpdateFailed,

    #[error("Route not found")]
    RouteNotFound,

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidBody(_) | ApiError::UpdateFailed => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                ApiError::Internal.to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(Message::failure(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(status = %rejection.status(), "rejected request body");
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "rejected todo id");
        ApiError::InvalidId
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(ApiError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidBody("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::UpdateFailed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_errors_map_to_500() {
        let err = ApiError::from(StoreError::Unavailable("down".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_match_wire_payloads() {
        assert_eq!(ApiError::InvalidId.to_string(), "Id invalid");
        assert_eq!(ApiError::NotFound.to_string(), "Todo not found!");
        assert_eq!(ApiError::UpdateFailed.to_string(), "Todo update failure!");
    }
}
