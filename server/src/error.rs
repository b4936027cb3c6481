//! Mapping of validation and store failures onto HTTP responses.
//!
//! Every failure becomes a status code plus a `{"message": ...}` body:
//! validation → 400, unknown id → 404, unavailable store → 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::model::ValidationError;
use crate::store::StoreError;

pub const NOT_FOUND_MESSAGE: &str = "Exercise not found";
pub const DELETED_MESSAGE: &str = "Exercise deleted successfully";

/// The `{message}` body carried by error responses and delete confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Exercise not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Validation(err) => warn!(error = %err, "rejected exercise payload"),
            AppError::NotFound => warn!("exercise not found"),
            AppError::Store(err) => error!(error = %err, "record store failure"),
        }
        (status, Json(MessageBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn store_not_found_maps_to_404() {
        let err: AppError = StoreError::NotFound { id: Uuid::nil() }.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn unavailable_store_maps_to_500() {
        let err: AppError = StoreError::unavailable("store is closed").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "record store unavailable: store is closed");
    }

    #[test]
    fn validation_maps_to_400_with_its_own_message() {
        let err: AppError = ValidationError::Body("expected a JSON object".to_string()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "invalid request body: expected a JSON object"
        );
    }
}
