use analytics::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Empty dataset or an unrecognised `returnMetric`.
    #[error("Invalid input")]
    InvalidInput,
    /// No record carries `investmentSize` or the selected metric.
    #[error("Missing required fields")]
    MissingFields,
    /// Unparseable body or a failed fit; the message is returned verbatim.
    #[error("{0}")]
    Internal(String),
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput | AppError::MissingFields => StatusCode::BAD_REQUEST,
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Regression request failed.");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Turns a handler panic into the same JSON shape as any other internal error.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    AppError::Internal(message).into_response()
}
