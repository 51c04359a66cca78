use crate::error::AnalyticsError;
use core_types::{Observation, ReturnMetric};

/// The regression input: `(ln(investmentSize), metric)` pairs in request order.
///
/// Every pair comes from a record that carried both values with a strictly
/// positive investment size. Records failing either condition are skipped
/// and only counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<(f64, f64)>,
    dropped: usize,
}

impl Dataset {
    /// Records with a null or absent value are skipped before any type check,
    /// so a non-numeric value only fails the request when its record would
    /// otherwise be used.
    pub fn from_observations(
        observations: &[Observation],
        metric: ReturnMetric,
    ) -> Result<Self, AnalyticsError> {
        let mut dataset = Dataset::default();

        for observation in observations {
            let size = observation.investment_size;
            let value = observation.metric(metric);
            if !size.has_value() || !value.has_value() {
                dataset.dropped += 1;
                continue;
            }

            let size = size.as_f64().ok_or_else(|| {
                AnalyticsError::InvalidValue("investmentSize must be numeric".to_string())
            })?;
            let value = value.as_f64().ok_or_else(|| {
                AnalyticsError::InvalidValue(format!("{} must be numeric", metric))
            })?;

            if size > 0.0 {
                dataset.points.push((size.ln(), value));
            } else {
                dataset.dropped += 1;
            }
        }

        Ok(dataset)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of records skipped for a missing value or a non-positive size.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// True when some record carries an `investmentSize` key and some record
/// carries the selected metric's key, null values included.
pub fn has_required_fields(observations: &[Observation], metric: ReturnMetric) -> bool {
    let has_size = observations.iter().any(|o| o.investment_size.is_present());
    let has_metric = observations.iter().any(|o| o.metric(metric).is_present());
    has_size && has_metric
}
