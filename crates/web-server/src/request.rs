use crate::error::AppError;
use analytics::has_required_fields;
use core_types::{Observation, ReturnMetric};
use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /v1/regression/scale-decay`.
///
/// Both fields are kept loose so that the checks in [`validate`] run in order
/// instead of failing at parse time on an unexpected shape.
///
/// [`validate`]: ScaleDecayRequest::validate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleDecayRequest {
    #[serde(default)]
    pub data: Value,
    #[serde(default = "default_return_metric")]
    pub return_metric: Value,
}

fn default_return_metric() -> Value {
    Value::String(ReturnMetric::default().field_name().to_string())
}

impl ScaleDecayRequest {
    /// Runs the input checks in order; the first failure wins.
    pub fn validate(self) -> Result<(ReturnMetric, Vec<Observation>), AppError> {
        let metric = self.return_metric();
        let metric = match metric {
            Some(metric) if !is_empty(&self.data) => metric,
            _ => return Err(AppError::InvalidInput),
        };

        let observations = records(self.data)?;
        if !has_required_fields(&observations, metric) {
            return Err(AppError::MissingFields);
        }

        Ok((metric, observations))
    }

    fn return_metric(&self) -> Option<ReturnMetric> {
        let selector = self.return_metric.as_str()?;
        selector
            .parse::<ReturnMetric>()
            .map_err(|e| tracing::debug!(error = %e, "Rejected return metric."))
            .ok()
    }
}

/// `null`, `false`, zero, and empty strings, arrays or objects carry no data.
fn is_empty(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Converts the `data` array into records. Elements that are not objects
/// carry no fields at all.
fn records(data: Value) -> Result<Vec<Observation>, AppError> {
    let Value::Array(items) = data else {
        return Err(AppError::Internal(
            "data must be an array of records".to_string(),
        ));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => {
                serde_json::from_value(item).map_err(|e| AppError::Internal(e.to_string()))
            }
            _ => Ok(Observation::default()),
        })
        .collect()
}
