//! Attaches headlines to segment winners.

use tracing::{debug, warn};

use crate::data_source::NewsSource;
use crate::selector::SegmentPicks;
use crate::{RunResult, SegmentWinner};

/// Headlines kept per winner unless configured otherwise.
pub const DEFAULT_HEADLINE_LIMIT: usize = 3;

pub struct ResultAssembler<'a> {
    news: &'a dyn NewsSource,
    headline_limit: usize,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(news: &'a dyn NewsSource, headline_limit: usize) -> Self {
        Self {
            news,
            headline_limit,
        }
    }

    /// Build the run result, one news request per winner.
    ///
    /// A failed or empty news lookup leaves the winner in place with no headlines.
    pub async fn assemble(&self, picks: SegmentPicks) -> RunResult {
        let mut result = RunResult::default();

        for (segment, candidate) in picks.into_vec() {
            let ticker = candidate.quote.ticker.clone();
            let mut news = match self.news.headlines(&ticker, self.headline_limit).await {
                Ok(headlines) => headlines,
                Err(error) => {
                    warn!(
                        provider = %self.news.id(),
                        %ticker,
                        %error,
                        "headline fetch failed; keeping winner without news"
                    );
                    Vec::new()
                }
            };
            news.truncate(self.headline_limit);
            debug!(%segment, %ticker, headlines = news.len(), "winner assembled");

            result.insert(segment, SegmentWinner::from_candidate(candidate, news));
        }

        result
    }
}
