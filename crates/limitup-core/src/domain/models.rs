use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Segment, Ticker, ValidationError};

/// Which figure ranks candidates inside a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueBasis {
    /// Close price multiplied by traded volume.
    #[default]
    CloseTimesVolume,
    /// The provider's own accumulated trading value, which may be priced
    /// on a different basis than the close.
    Reported,
}

impl ValueBasis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CloseTimesVolume => "close-times-volume",
            Self::Reported => "reported",
        }
    }
}

impl Display for ValueBasis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueBasis {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "close-times-volume" => Ok(Self::CloseTimesVolume),
            "reported" => Ok(Self::Reported),
            other => Err(ValidationError::InvalidValueBasis {
                value: other.to_owned(),
            }),
        }
    }
}

/// One instrument's daily figures as reported by a market data provider.
///
/// `pct_chg` is kept at the provider's precision; it is rounded only when a
/// winner is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentQuote {
    pub ticker: Ticker,
    pub name: String,
    pub open: u64,
    pub close: u64,
    pub pct_chg: f64,
    pub volume: u64,
    pub reported_value: Option<u64>,
}

impl InstrumentQuote {
    pub fn new(
        ticker: Ticker,
        name: impl Into<String>,
        open: u64,
        close: u64,
        pct_chg: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        if !pct_chg.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "pct_chg" });
        }

        Ok(Self {
            ticker,
            name: name.into(),
            open,
            close,
            pct_chg,
            volume,
            reported_value: None,
        })
    }

    pub fn with_reported_value(mut self, reported_value: Option<u64>) -> Self {
        self.reported_value = reported_value;
        self
    }

    /// Trading value in whole won under the given basis.
    ///
    /// `Reported` falls back to close × volume when the provider supplied no figure.
    pub fn trading_value(&self, basis: ValueBasis) -> u64 {
        let computed = self.close.saturating_mul(self.volume);
        match basis {
            ValueBasis::CloseTimesVolume => computed,
            ValueBasis::Reported => self.reported_value.unwrap_or(computed),
        }
    }
}

/// A quote that met the limit-up threshold, tagged with its board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitUpCandidate {
    pub quote: InstrumentQuote,
    pub segment: Segment,
    pub value: u64,
    /// Position in the provider's instrument listing.
    pub rank: usize,
}

/// Per-segment winner as persisted in the run artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentWinner {
    pub ticker: Ticker,
    pub name: String,
    pub close: u64,
    pub open: u64,
    pub pct_chg: f64,
    pub volume: u64,
    pub value: u64,
    pub news: Vec<String>,
}

impl SegmentWinner {
    pub fn from_candidate(candidate: LimitUpCandidate, news: Vec<String>) -> Self {
        let LimitUpCandidate { quote, value, .. } = candidate;
        Self {
            ticker: quote.ticker,
            name: quote.name,
            close: quote.close,
            open: quote.open,
            pct_chg: round_to_cents(quote.pct_chg),
            volume: quote.volume,
            value,
            news,
        }
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(close: u64, volume: u64) -> InstrumentQuote {
        InstrumentQuote::new(
            Ticker::parse("005930").expect("ticker"),
            "Samsung Electronics",
            90,
            close,
            30.0,
            volume,
        )
        .expect("valid quote")
    }

    #[test]
    fn quote_keeps_raw_percent_change() {
        let quote = InstrumentQuote::new(
            Ticker::parse("005930").expect("ticker"),
            "x",
            1,
            1,
            29.496,
            1,
        )
        .expect("valid quote");
        assert_eq!(quote.pct_chg, 29.496);
    }

    #[test]
    fn winner_rounds_percent_change_to_two_digits() {
        let quote = InstrumentQuote::new(
            Ticker::parse("005930").expect("ticker"),
            "x",
            1,
            1,
            29.8765,
            1,
        )
        .expect("valid quote");
        let candidate = LimitUpCandidate {
            quote,
            segment: Segment::Kospi,
            value: 1,
            rank: 0,
        };
        assert_eq!(SegmentWinner::from_candidate(candidate, Vec::new()).pct_chg, 29.88);
    }

    #[test]
    fn rejects_non_finite_percent_change() {
        let err = InstrumentQuote::new(
            Ticker::parse("005930").expect("ticker"),
            "x",
            1,
            1,
            f64::NAN,
            1,
        )
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { field: "pct_chg" }));
    }

    #[test]
    fn trading_value_uses_close_times_volume_by_default() {
        let quote = quote(100, 10).with_reported_value(Some(999));
        assert_eq!(quote.trading_value(ValueBasis::default()), 1_000);
    }

    #[test]
    fn reported_basis_prefers_provider_figure_and_falls_back() {
        assert_eq!(
            quote(100, 10)
                .with_reported_value(Some(987))
                .trading_value(ValueBasis::Reported),
            987
        );
        assert_eq!(quote(100, 10).trading_value(ValueBasis::Reported), 1_000);
    }

    #[test]
    fn trading_value_saturates_instead_of_overflowing() {
        assert_eq!(
            quote(u64::MAX, 2).trading_value(ValueBasis::CloseTimesVolume),
            u64::MAX
        );
    }

    #[test]
    fn parses_value_basis() {
        assert_eq!(
            ValueBasis::from_str("Reported").expect("must parse"),
            ValueBasis::Reported
        );
        assert!(matches!(
            ValueBasis::from_str("vwap"),
            Err(ValidationError::InvalidValueBasis { .. })
        ));
    }
}
