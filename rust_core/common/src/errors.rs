use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VariantError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for VariantError {
    fn from(e: serde_json::Error) -> Self {
        VariantError::Parse(e.to_string())
    }
}
