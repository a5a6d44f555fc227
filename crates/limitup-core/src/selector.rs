//! Limit-up candidate filtering and per-segment winner selection.

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::data_source::{MarketDataSource, SourceError};
use crate::{
    InstrumentQuote, LeadingDigitClassifier, LimitUpCandidate, Segment, SegmentClassifier,
    TradeDate, ValueBasis,
};

/// Daily change, in percent, at or above which a close counts as limit-up.
///
/// The band is ±30%; 29.5 leaves room for tick-size rounding at the ceiling.
pub const LIMIT_UP_THRESHOLD_PCT: f64 = 29.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    pub threshold_pct: f64,
    pub value_basis: ValueBasis,
}

impl SelectorConfig {
    /// Inclusive threshold test on the unrounded daily change.
    pub fn is_limit_up(&self, pct_chg: f64) -> bool {
        pct_chg >= self.threshold_pct
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            threshold_pct: LIMIT_UP_THRESHOLD_PCT,
            value_basis: ValueBasis::default(),
        }
    }
}

/// Highest-value candidate of each segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPicks {
    pub kospi: Option<LimitUpCandidate>,
    pub kosdaq: Option<LimitUpCandidate>,
}

impl SegmentPicks {
    pub fn get(&self, segment: Segment) -> Option<&LimitUpCandidate> {
        match segment {
            Segment::Kospi => self.kospi.as_ref(),
            Segment::Kosdaq => self.kosdaq.as_ref(),
        }
    }

    fn slot_mut(&mut self, segment: Segment) -> &mut Option<LimitUpCandidate> {
        match segment {
            Segment::Kospi => &mut self.kospi,
            Segment::Kosdaq => &mut self.kosdaq,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kospi.is_none() && self.kosdaq.is_none()
    }

    /// Picks in output order (KOSPI first), skipping empty segments.
    pub fn into_vec(self) -> Vec<(Segment, LimitUpCandidate)> {
        [
            (Segment::Kospi, self.kospi),
            (Segment::Kosdaq, self.kosdaq),
        ]
        .into_iter()
        .filter_map(|(segment, pick)| pick.map(|candidate| (segment, candidate)))
        .collect()
    }
}

/// Pick the maximum-value candidate per segment.
///
/// On equal value the candidate that appeared first in the provider's listing
/// (lowest `rank`) is kept, independent of input order.
pub fn select_winners<I>(candidates: I) -> SegmentPicks
where
    I: IntoIterator<Item = LimitUpCandidate>,
{
    let mut picks = SegmentPicks::default();

    for candidate in candidates {
        let slot = picks.slot_mut(candidate.segment);
        let replace = match slot.as_ref() {
            None => true,
            Some(current) => {
                candidate.value > current.value
                    || (candidate.value == current.value && candidate.rank < current.rank)
            }
        };
        if replace {
            *slot = Some(candidate);
        }
    }

    picks
}

/// Scans a day's universe for limit-up closes.
#[derive(Clone)]
pub struct LimitUpSelector {
    config: SelectorConfig,
    classifier: Arc<dyn SegmentClassifier>,
}

impl Default for LimitUpSelector {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}

impl LimitUpSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            classifier: Arc::new(LeadingDigitClassifier),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn SegmentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Qualifying candidates in provider order.
    ///
    /// A failed listing aborts the scan. A missing or failed quote for a single
    /// instrument only drops that instrument.
    pub async fn collect_candidates(
        &self,
        market: &dyn MarketDataSource,
        date: &TradeDate,
    ) -> Result<Vec<LimitUpCandidate>, SourceError> {
        let tickers = market.list_instruments(date).await?;
        info!(
            provider = %market.id(),
            date = %date,
            instruments = tickers.len(),
            "scanning universe for limit-up closes"
        );

        let mut candidates = Vec::new();
        for (rank, ticker) in tickers.iter().enumerate() {
            let quote = match market.daily_quote(date, ticker).await {
                Ok(Some(quote)) => quote,
                Ok(None) => {
                    trace!(%ticker, "no quote for date");
                    continue;
                }
                Err(error) => {
                    warn!(%ticker, %error, "quote fetch failed; skipping instrument");
                    continue;
                }
            };

            if !self.config.is_limit_up(quote.pct_chg) {
                continue;
            }

            let quote = self.with_display_name(market, quote).await;
            let segment = self.classifier.classify(&quote.ticker);
            let value = quote.trading_value(self.config.value_basis);
            debug!(
                ticker = %quote.ticker,
                %segment,
                pct_chg = quote.pct_chg,
                value,
                "limit-up candidate"
            );

            candidates.push(LimitUpCandidate {
                quote,
                segment,
                value,
                rank,
            });
        }

        Ok(candidates)
    }

    /// Top candidate per segment for `date`.
    pub async fn select(
        &self,
        market: &dyn MarketDataSource,
        date: &TradeDate,
    ) -> Result<SegmentPicks, SourceError> {
        let candidates = self.collect_candidates(market, date).await?;
        let count = candidates.len();
        let picks = select_winners(candidates);
        info!(
            candidates = count,
            kospi = ?picks.kospi.as_ref().map(|c| c.quote.ticker.as_str()),
            kosdaq = ?picks.kosdaq.as_ref().map(|c| c.quote.ticker.as_str()),
            "segment winners selected"
        );
        Ok(picks)
    }

    async fn with_display_name(
        &self,
        market: &dyn MarketDataSource,
        mut quote: InstrumentQuote,
    ) -> InstrumentQuote {
        if !quote.name.trim().is_empty() {
            return quote;
        }
        match market.display_name(&quote.ticker).await {
            Ok(name) => quote.name = name,
            Err(error) => {
                warn!(ticker = %quote.ticker, %error, "display name lookup failed");
            }
        }
        quote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ticker;

    fn candidate(code: &str, value: u64, rank: usize) -> LimitUpCandidate {
        let ticker = Ticker::parse(code).expect("ticker");
        let segment = LeadingDigitClassifier.classify(&ticker);
        LimitUpCandidate {
            quote: InstrumentQuote::new(ticker, code, 1, value, 30.0, 1).expect("quote"),
            segment,
            value,
            rank,
        }
    }

    #[test]
    fn threshold_is_inclusive_on_the_raw_change() {
        let config = SelectorConfig::default();
        assert!(config.is_limit_up(29.5));
        assert!(config.is_limit_up(30.0));
        assert!(!config.is_limit_up(29.49));
        assert!(!config.is_limit_up(29.496));
    }

    #[test]
    fn picks_maximum_value_per_segment() {
        let picks = select_winners(vec![
            candidate("005930", 1_000, 0),
            candidate("010140", 9_000, 1),
            candidate("950130", 500, 2),
            candidate("950220", 7_000, 3),
        ]);

        assert_eq!(picks.kospi.expect("kospi").quote.ticker.as_str(), "010140");
        assert_eq!(picks.kosdaq.expect("kosdaq").quote.ticker.as_str(), "950220");
    }

    #[test]
    fn equal_value_keeps_earliest_listing_regardless_of_input_order() {
        let picks = select_winners(vec![
            candidate("020000", 5_000, 4),
            candidate("010000", 5_000, 1),
            candidate("030000", 5_000, 7),
        ]);
        assert_eq!(picks.kospi.expect("kospi").quote.ticker.as_str(), "010000");
        assert!(picks.kosdaq.is_none());
    }

    #[test]
    fn no_candidates_means_no_picks() {
        let picks = select_winners(Vec::new());
        assert!(picks.is_empty());
        assert!(picks.into_vec().is_empty());
    }
}
