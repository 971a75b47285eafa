//! Request-scoped error taxonomy for the prediction pipeline.
//!
//! Every variant is returned to the caller of a single prediction request.
//! None of them are process-fatal; startup failures go through `anyhow`
//! in `main.rs` instead.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors produced while serving one AQI or best-time prediction.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// A pollutant reading outside its sensor range, or a date outside the
    /// forecast window.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// The external model call failed. Not retried.
    #[error("Model inference failed: {0}")]
    ModelInferenceFailure(String),

    /// A rounded AQI value that no severity band covers.
    #[error("AQI value {0:.2} does not fall into any severity band")]
    UnclassifiedValue(f64),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PredictionError>;

impl PredictionError {
    pub fn status_code(&self) -> StatusCode {
        // ---
        match self {
            PredictionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PredictionError::UnknownCity(_) => StatusCode::NOT_FOUND,
            PredictionError::ModelInferenceFailure(_) => StatusCode::BAD_GATEWAY,
            PredictionError::UnclassifiedValue(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// A request body that could not be parsed is invalid input, whatever
/// status axum would have picked for it.
impl From<JsonRejection> for PredictionError {
    fn from(rejection: JsonRejection) -> Self {
        PredictionError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for PredictionError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status_code();
        let message = self.to_string();

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "status": status.as_u16(),
            })),
        )
            .into_response()
    }
}
