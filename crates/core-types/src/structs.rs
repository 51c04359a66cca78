use crate::enums::ReturnMetric;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// A numeric record field as it appeared in the request.
///
/// Keeping "absent" apart from "null" matters: a key that is present anywhere
/// in the dataset counts as a column even when its values are null.
/// Non-numeric values parse as `Invalid`; whether that is an error depends on
/// whether the record ends up in the regression.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Absent,
    Null,
    Number(f64),
    Invalid,
}

impl FieldValue {
    pub fn is_present(&self) -> bool {
        !matches!(self, FieldValue::Absent)
    }

    /// Present and not null.
    pub fn has_value(&self) -> bool {
        matches!(self, FieldValue::Number(_) | FieldValue::Invalid)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Number(f64),
    Other(IgnoredAny),
}

// Only called when the key exists; `#[serde(default)]` covers the absent case.
impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawField>::deserialize(deserializer)? {
            Some(RawField::Number(v)) => FieldValue::Number(v),
            Some(RawField::Other(_)) => FieldValue::Invalid,
            None => FieldValue::Null,
        })
    }
}

/// One portfolio investment as submitted in the request `data` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default)]
    pub investment_size: FieldValue,
    #[serde(default)]
    pub moic: FieldValue,
    #[serde(default)]
    pub irr: FieldValue,
}

impl Observation {
    /// The value of the selected return metric.
    pub fn metric(&self, metric: ReturnMetric) -> FieldValue {
        match metric {
            ReturnMetric::Moic => self.moic,
            ReturnMetric::Irr => self.irr,
        }
    }
}
