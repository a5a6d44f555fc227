use thiserror::Error;

/// Validation and contract errors exposed by `limitup-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("date must be YYYYMMDD: '{value}'")]
    InvalidDateFormat { value: String },
    #[error("date is not a valid calendar day: '{value}'")]
    InvalidCalendarDate { value: String },

    #[error("invalid value basis '{value}', expected one of close-times-volume, reported")]
    InvalidValueBasis { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("headline limit must be greater than zero")]
    ZeroHeadlineLimit,
}
