use crate::error::CoreError;
use std::fmt;
use std::str::FromStr;

/// The return metric regressed against investment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnMetric {
    /// Multiple on invested capital.
    #[default]
    Moic,
    /// Internal rate of return.
    Irr,
}

impl ReturnMetric {
    /// The JSON field name carrying this metric on each record.
    pub fn field_name(&self) -> &'static str {
        match self {
            ReturnMetric::Moic => "moic",
            ReturnMetric::Irr => "irr",
        }
    }
}

impl fmt::Display for ReturnMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for ReturnMetric {
    type Err = CoreError;

    /// Matching is exact: `"MOIC"` is not a valid selector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moic" => Ok(ReturnMetric::Moic),
            "irr" => Ok(ReturnMetric::Irr),
            other => Err(CoreError::InvalidInput(
                "returnMetric".to_string(),
                other.to_string(),
            )),
        }
    }
}
