use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Degenerate data: {0}")]
    DegenerateData(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
