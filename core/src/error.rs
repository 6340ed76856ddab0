use chrono::NaiveDate;
use thiserror::Error;

/// Failures inside the symptom log core.
///
/// None of these escape the infallible store and builder entry points; they are
/// logged there and surfaced only through the `try_*` variants.
#[derive(Debug, Error)]
pub enum SymptomLogError {
    #[error("stored symptom log is unreadable: {0}")]
    Decode(String),

    #[error("failed to encode symptom log: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("no entry {index} on {day} ({len} recorded)")]
    IndexOutOfRange {
        day: NaiveDate,
        index: usize,
        len: usize,
    },

    #[error("invalid range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("storage failure: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for SymptomLogError {
    fn from(err: anyhow::Error) -> Self {
        SymptomLogError::Storage(err)
    }
}

pub type Result<T> = std::result::Result<T, SymptomLogError>;
