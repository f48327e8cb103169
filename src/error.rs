//! Error types shared across the portal.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::draft::RequiredField;

/// A string did not name a known value of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Failure writing a report to the document store.
///
/// This is the only runtime failure category of the submission flow.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The request never got an answer. The URL is stripped before the
    /// error is stored.
    #[error("request to document store failed: {0}")]
    Transport(reqwest::Error),

    #[error("document store rejected the write ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        PersistenceError::Transport(err.without_url())
    }
}

impl PersistenceError {
    /// The most useful detail to show a passenger.
    pub fn detail(&self) -> Option<String> {
        match self {
            PersistenceError::Rejected { message, .. } if !message.is_empty() => {
                Some(message.clone())
            }
            PersistenceError::Unavailable(message) if !message.is_empty() => {
                Some(message.clone())
            }
            PersistenceError::Rejected { .. } | PersistenceError::Unavailable(_) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("required fields missing: {missing:?}")]
    Incomplete {
        message: String,
        missing: Vec<RequiredField>,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Incomplete { message, missing } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": { "message": message, "missing": missing } }),
            ),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": { "message": "Bad request", "details": detail } }),
            ),
            ApiError::NotFound(detail) => (
                StatusCode::NOT_FOUND,
                json!({ "error": { "message": "Resource not found", "details": detail } }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_detail_prefers_store_message() {
        let err = PersistenceError::Rejected {
            status: 403,
            message: "Missing or insufficient permissions.".to_string(),
        };
        assert_eq!(
            err.detail().as_deref(),
            Some("Missing or insufficient permissions.")
        );

        let err = PersistenceError::Rejected {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_incomplete_maps_to_unprocessable() {
        let response = ApiError::Incomplete {
            message: "Please fill in all required fields.".to_string(),
            missing: vec![RequiredField::Title],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
