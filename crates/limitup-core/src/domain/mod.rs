//! # Domain Models
//!
//! Canonical types for one trading day's limit-up selection.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated exchange short code |
//! | [`TradeDate`] | Compact `YYYYMMDD` trading date |
//! | [`Segment`] | Listing board (KOSPI / KOSDAQ) |
//! | [`InstrumentQuote`] | One instrument's daily OHLCV and change |
//! | [`LimitUpCandidate`] | Quote that met the limit-up threshold |
//! | [`SegmentWinner`] | Top candidate of a board plus headlines |
//!
//! Constructors validate their inputs, so a value that exists is usable:
//!
//! ```rust
//! use limitup_core::{Ticker, TradeDate, ValidationError};
//!
//! let ticker = Ticker::parse("005930").unwrap();
//! assert_eq!(ticker.as_str(), "005930");
//!
//! let bad = TradeDate::parse("2025-06-18");
//! assert!(matches!(bad, Err(ValidationError::InvalidDateFormat { .. })));
//! ```

mod models;
mod segment;
mod ticker;
mod trade_date;

pub use models::{InstrumentQuote, LimitUpCandidate, SegmentWinner, ValueBasis};
pub use segment::{LeadingDigitClassifier, Segment, SegmentClassifier};
pub use ticker::Ticker;
pub use trade_date::{TradeDate, KST};
