use crate::engine::OlsFit;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

/// Significance level for the slope's two-sided test.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

pub const SIGNIFICANT: &str = "There is statistically significant evidence of scale decay.";
pub const NOT_SIGNIFICANT: &str = "There is no statistically significant evidence of scale decay.";

/// The response body of a successful scale-decay regression.
///
/// All numbers are rounded to 4 decimal places. The interpretation is decided
/// on the unrounded p-value; an undefined p-value (`null`) is never significant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleDecayReport {
    pub coefficient: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub p_value: Option<f64>,
    pub interpretation: String,
}

impl ScaleDecayReport {
    pub fn from_fit(fit: &OlsFit) -> Self {
        let interpretation = match fit.p_value {
            Some(p) if p < SIGNIFICANCE_LEVEL => SIGNIFICANT,
            _ => NOT_SIGNIFICANT,
        };

        Self {
            coefficient: round_dp4(fit.coefficient),
            intercept: round_dp4(fit.intercept),
            r_squared: round_dp4(fit.r_squared),
            p_value: fit.p_value.map(round_dp4),
            interpretation: interpretation.to_string(),
        }
    }
}

/// Rounds half-to-even at 4 decimals on the exact binary value.
pub fn round_dp4(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(4, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        // Out of Decimal's range; plain scaling is exact enough there.
        .unwrap_or_else(|| (value * 1e4).round() / 1e4)
}
