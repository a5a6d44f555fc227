//! Provider contracts consumed by the selection pipeline.
//!
//! | Trait | Operations | Description |
//! |-------|------------|-------------|
//! | [`MarketDataSource`] | `list_instruments`, `daily_quote`, `display_name` | Daily universe and figures |
//! | [`NewsSource`] | `headlines` | Recent headlines per instrument |
//!
//! Methods return boxed futures so adapters can be stored as trait objects.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::http_client::HttpError;
use crate::{InstrumentQuote, ProviderId, Ticker, TradeDate};

pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Network failure, timeout or non-success status.
    Unavailable,
    InvalidRequest,
    /// The provider answered, but not in a shape we can read.
    MalformedResponse,
    Internal,
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::MalformedResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    /// Classify a transport failure for `provider`.
    pub fn from_transport(provider: ProviderId, error: &HttpError) -> Self {
        if error.timed_out() {
            Self::unavailable(format!("{provider} request timed out: {}", error.message()))
        } else {
            Self::unavailable(format!("{provider} transport error: {}", error.message()))
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SourceError {}

impl From<crate::ValidationError> for SourceError {
    fn from(error: crate::ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Daily market data for one exchange.
pub trait MarketDataSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Identifiers listed on `date`, in provider order.
    fn list_instruments<'a>(&'a self, date: &'a TradeDate) -> SourceFuture<'a, Vec<Ticker>>;

    /// Single-day figures, or `None` when the provider has no row for the date.
    fn daily_quote<'a>(
        &'a self,
        date: &'a TradeDate,
        ticker: &'a Ticker,
    ) -> SourceFuture<'a, Option<InstrumentQuote>>;

    fn display_name<'a>(&'a self, ticker: &'a Ticker) -> SourceFuture<'a, String>;
}

/// Recent headlines for an instrument.
pub trait NewsSource: Send + Sync {
    fn id(&self) -> ProviderId;

    /// At most `max` headlines, newest first as the provider orders them.
    fn headlines<'a>(&'a self, ticker: &'a Ticker, max: usize) -> SourceFuture<'a, Vec<String>>;
}
