//! Error types for the todo API client.
//!
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! resource does not exist" from "the server returned an unexpected status".
//! All other non-2xx responses land in `HttpError` with the raw status and
//! body.

use thiserror::Error;

use crate::http::TransportError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 404, or 200 with a `null` body, for the id.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Rejected locally before any request was sent.
    #[error("title must not be empty")]
    EmptyTitle,

    /// `save_edit` was called with no todo in edit mode.
    #[error("no todo is being edited")]
    NotEditing,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// The `message` field of a JSON error body, when the server sent one.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::HttpError { body, .. } => serde_json::from_str::<crate::types::Message>(body)
                .ok()
                .map(|m| m.message),
            _ => None,
        }
    }
}
