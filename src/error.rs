use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Shape mismatch: {component} expects {expected} features, got {actual}")]
    ShapeMismatch {
        component: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ForecastError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ForecastError::Upstream(_) => "UPSTREAM_ERROR",
            ForecastError::Validation(_) => "VALIDATION_ERROR",
            ForecastError::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            ForecastError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key
        ForecastError::Upstream(err.without_url().to_string())
    }
}

impl From<anyhow::Error> for ForecastError {
    fn from(err: anyhow::Error) -> Self {
        ForecastError::Unknown(err.to_string())
    }
}

/// Body of every failed `/predict` reply. Only the message leaves the process.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        tracing::error!(
            error = ?self,
            error_code = self.error_code(),
            "Prediction failed"
        );

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
