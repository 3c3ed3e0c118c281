use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::publish::PublishError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Publisher error: {0}")]
    Publisher(#[from] PublishError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Pipeline(e @ PipelineError::Exhausted { .. }) => {
                tracing::warn!("Pipeline exhausted: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PIPELINE_EXHAUSTED",
                    e.to_string(),
                )
            }
            AppError::Pipeline(e @ PipelineError::Unrecorded { .. }) => {
                tracing::error!("Unrecorded post: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "POST_NOT_RECORDED",
                    e.to_string(),
                )
            }
            AppError::Pipeline(e) => {
                tracing::error!("Pipeline error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "An upstream service failed during the run".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Publisher(e) => {
                tracing::error!("Publisher error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PUBLISHER_UNAVAILABLE",
                    "The publishing service could not be reached".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
