use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::Message;
use crate::store::StoreError;

/// Every failure a route can produce. Rendered as a status plus `{"message": ...}`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Todo not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Store failure on a write path (create, replace, partial-update).
    pub fn rejected(err: StoreError) -> Self {
        ServiceError::BadRequest(err.to_string())
    }

    /// Store failure on list or delete.
    pub fn internal(err: StoreError) -> Self {
        ServiceError::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }
        (status, Json(Message::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_by_operation_kind() {
        let rejected = ServiceError::rejected(StoreError::Rejected("title too long".into()));
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
        assert_eq!(rejected.to_string(), "title too long");

        let internal = ServiceError::internal(StoreError::Unavailable("timeout".into()));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.to_string(), "store unavailable: timeout");
    }

    #[test]
    fn not_found_has_fixed_message() {
        assert_eq!(ServiceError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::NotFound.to_string(), "Todo not found");
    }
}
