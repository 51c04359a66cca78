use crate::dataset::Dataset;
use crate::error::AnalyticsError;
use crate::report::ScaleDecayReport;
use core_types::{Observation, ReturnMetric};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Two points with distinct sizes determine the line.
pub const MIN_OBSERVATIONS: usize = 2;

/// Raw statistics of `metric = intercept + coefficient * ln(investmentSize)`.
///
/// The inferential fields are `None` when no residual degree of freedom is
/// left (`n == 2`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    pub coefficient: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Standard error of the slope.
    pub std_error: Option<f64>,
    pub t_statistic: Option<f64>,
    /// Two-sided p-value for a zero slope, t distribution with `n - 2` df.
    pub p_value: Option<f64>,
    pub observations: usize,
}

/// A stateless calculator for the scale-decay regression.
#[derive(Debug, Default)]
pub struct RegressionEngine {}

impl RegressionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters the observations, fits the model and formats the report.
    pub fn run(
        &self,
        observations: &[Observation],
        metric: ReturnMetric,
    ) -> Result<ScaleDecayReport, AnalyticsError> {
        let dataset = Dataset::from_observations(observations, metric)?;
        tracing::debug!(
            %metric,
            received = observations.len(),
            dropped = dataset.dropped(),
            used = dataset.len(),
            "Prepared regression dataset."
        );

        let fit = self.fit(&dataset)?;
        Ok(ScaleDecayReport::from_fit(&fit))
    }

    /// Ordinary least squares with an intercept, in closed form on centered sums.
    ///
    /// # Errors
    ///
    /// Fails when there are fewer than `MIN_OBSERVATIONS` points, when either
    /// variable has zero variance, or when any statistic is not finite.
    pub fn fit(&self, dataset: &Dataset) -> Result<OlsFit, AnalyticsError> {
        let points = dataset.points();
        let n = points.len();
        if n < MIN_OBSERVATIONS {
            return Err(AnalyticsError::NotEnoughData(format!(
                "{} usable observations, at least {} required",
                n, MIN_OBSERVATIONS
            )));
        }

        let n_f = n as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n_f;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n_f;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        let mut sum_x2 = 0.0;
        for &(x, y) in points {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
            sum_x2 += x * x;
        }

        // Identical sizes leave only rounding noise in sxx.
        if sxx <= f64::EPSILON * sum_x2 {
            return Err(AnalyticsError::DegenerateData(
                "logSize has zero variance; the slope is not identifiable".to_string(),
            ));
        }
        if syy == 0.0 {
            return Err(AnalyticsError::DegenerateData(
                "return metric has zero variance; rSquared is undefined".to_string(),
            ));
        }

        let coefficient = sxy / sxx;
        let intercept = mean_y - coefficient * mean_x;

        let ss_res: f64 = points
            .iter()
            .map(|&(x, y)| {
                let residual = y - (intercept + coefficient * x);
                residual * residual
            })
            .sum();
        let r_squared = 1.0 - ss_res / syy;

        let df = n - 2;
        let (std_error, t_statistic, p_value) = if df == 0 {
            (None, None, None)
        } else {
            let std_error = (ss_res / df as f64 / sxx).sqrt();
            let (t_statistic, p_value) =
                self.slope_significance(coefficient, std_error, df as f64)?;
            (Some(std_error), Some(t_statistic), Some(p_value))
        };

        let fit = OlsFit {
            coefficient,
            intercept,
            r_squared,
            std_error,
            t_statistic,
            p_value,
            observations: n,
        };

        let p_value_finite = fit.p_value.is_none_or(f64::is_finite);
        if !p_value_finite
            || [fit.coefficient, fit.intercept, fit.r_squared]
                .iter()
                .any(|v| !v.is_finite())
        {
            return Err(AnalyticsError::Calculation(
                "regression produced a non-finite statistic".to_string(),
            ));
        }

        Ok(fit)
    }

    /// t statistic and two-sided p-value for the null hypothesis of a zero slope.
    fn slope_significance(
        &self,
        coefficient: f64,
        std_error: f64,
        df: f64,
    ) -> Result<(f64, f64), AnalyticsError> {
        if std_error == 0.0 {
            // Exact fit: the slope is known without error.
            return Ok((f64::INFINITY.copysign(coefficient), 0.0));
        }

        let t_statistic = coefficient / std_error;
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| AnalyticsError::Calculation(e.to_string()))?;
        let p_value = 2.0 * dist.sf(t_statistic.abs());

        Ok((t_statistic, p_value.clamp(0.0, 1.0)))
    }
}
