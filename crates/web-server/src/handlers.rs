use crate::error::AppError;
use crate::request::ScaleDecayRequest;
use analytics::{RegressionEngine, ScaleDecayReport};
use axum::{body::Bytes, Json};

/// # POST /v1/regression/scale-decay
/// Regresses the selected return metric on ln(investmentSize).
///
/// The body is parsed here rather than by the `Json` extractor so that a
/// malformed body, or a missing content type, surfaces as a JSON 500 like
/// every other internal failure.
pub async fn scale_decay_regression(body: Bytes) -> Result<Json<ScaleDecayReport>, AppError> {
    let request: ScaleDecayRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::Internal(e.to_string()))?;
    let (metric, observations) = request.validate()?;

    let report = RegressionEngine::new().run(&observations, metric)?;
    Ok(Json(report))
}

/// # GET /v1/health
pub async fn health() -> &'static str {
    "OK"
}
