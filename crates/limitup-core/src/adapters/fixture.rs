//! Deterministic in-memory providers for offline runs and tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::data_source::{MarketDataSource, NewsSource, SourceError, SourceFuture};
use crate::{InstrumentQuote, ProviderId, Ticker, TradeDate};

/// Market data served from a fixed list of quotes, identical for every date.
///
/// Tickers can be listed without a quote to model sparse provider data.
#[derive(Debug, Default)]
pub struct FixtureMarketData {
    listing: Vec<Ticker>,
    quotes: HashMap<Ticker, InstrumentQuote>,
    names: HashMap<Ticker, String>,
    failing_quotes: HashSet<Ticker>,
    listing_error: Option<SourceError>,
    calls: AtomicUsize,
}

impl FixtureMarketData {
    pub fn new(quotes: Vec<InstrumentQuote>) -> Self {
        let mut fixture = Self::default();
        for quote in quotes {
            fixture = fixture.with_quote(quote);
        }
        fixture
    }

    /// A small sample session with limit-up names on both boards.
    pub fn sample() -> Self {
        let rows: [(&str, &str, u64, u64, f64, u64); 6] = [
            ("005930", "삼성전자", 58_000, 59_800, 1.12, 12_345_678),
            ("010140", "삼성중공업", 9_000, 11_700, 30.0, 8_000_000),
            ("001440", "대한전선", 10_000, 13_000, 29.85, 2_000_000),
            ("950130", "엑세스바이오", 5_010, 6_500, 29.87, 1_500_000),
            ("950220", "네오이뮨텍", 30_000, 38_900, 29.67, 900_000),
            ("696969", "테스트바이오", 1_000, 1_290, 29.0, 5_000_000),
        ];

        let quotes = rows
            .into_iter()
            .filter_map(|(code, name, open, close, pct, volume)| {
                let ticker = Ticker::parse(code).ok()?;
                InstrumentQuote::new(ticker, name, open, close, pct, volume).ok()
            })
            .collect();

        Self::new(quotes)
    }

    pub fn with_quote(mut self, quote: InstrumentQuote) -> Self {
        if !self.listing.contains(&quote.ticker) {
            self.listing.push(quote.ticker.clone());
        }
        self.names.insert(quote.ticker.clone(), quote.name.clone());
        self.quotes.insert(quote.ticker.clone(), quote);
        self
    }

    /// List `ticker` with no quote for any date.
    pub fn with_missing(mut self, ticker: Ticker) -> Self {
        if !self.listing.contains(&ticker) {
            self.listing.push(ticker);
        }
        self
    }

    pub fn with_name(mut self, ticker: Ticker, name: impl Into<String>) -> Self {
        self.names.insert(ticker, name.into());
        self
    }

    /// Make the quote lookup for `ticker` fail with a transport error.
    pub fn with_failing_quote(mut self, ticker: Ticker) -> Self {
        self.failing_quotes.insert(ticker);
        self
    }

    /// Make the instrument listing itself fail.
    pub fn with_listing_error(mut self, error: SourceError) -> Self {
        self.listing_error = Some(error);
        self
    }

    /// Number of provider calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl MarketDataSource for FixtureMarketData {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn list_instruments<'a>(&'a self, date: &'a TradeDate) -> SourceFuture<'a, Vec<Ticker>> {
        Box::pin(async move {
            let _ = date;
            self.record_call();
            match &self.listing_error {
                Some(error) => Err(error.clone()),
                None => Ok(self.listing.clone()),
            }
        })
    }

    fn daily_quote<'a>(
        &'a self,
        date: &'a TradeDate,
        ticker: &'a Ticker,
    ) -> SourceFuture<'a, Option<InstrumentQuote>> {
        Box::pin(async move {
            let _ = date;
            self.record_call();
            if self.failing_quotes.contains(ticker) {
                return Err(SourceError::unavailable(format!(
                    "fixture quote for {ticker} timed out"
                )));
            }
            Ok(self.quotes.get(ticker).cloned())
        })
    }

    fn display_name<'a>(&'a self, ticker: &'a Ticker) -> SourceFuture<'a, String> {
        Box::pin(async move {
            self.record_call();
            self.names
                .get(ticker)
                .cloned()
                .ok_or_else(|| SourceError::invalid_request(format!("unknown ticker {ticker}")))
        })
    }
}

/// Headlines served from a fixed table.
#[derive(Debug, Default)]
pub struct FixtureNews {
    headlines: HashMap<Ticker, Vec<String>>,
    failing: HashSet<Ticker>,
    requested: std::sync::Mutex<Vec<Ticker>>,
}

impl FixtureNews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two or more generic headlines for every ticker in [`FixtureMarketData::sample`].
    pub fn sample() -> Self {
        let mut news = Self::new();
        for code in ["005930", "010140", "001440", "950130", "950220", "696969"] {
            if let Ok(ticker) = Ticker::parse(code) {
                news = news.with_headlines(
                    ticker.clone(),
                    vec![
                        format!("[{code}] 거래대금 급증 속 상한가"),
                        format!("[{code}] 기관·외국인 동반 순매수"),
                        format!("[{code}] 신사업 기대감 부각"),
                        format!("[{code}] 증권가 목표주가 상향"),
                    ],
                );
            }
        }
        news
    }

    pub fn with_headlines(mut self, ticker: Ticker, headlines: Vec<String>) -> Self {
        self.headlines.insert(ticker, headlines);
        self
    }

    /// Make headline requests for `ticker` fail.
    pub fn with_failure(mut self, ticker: Ticker) -> Self {
        self.failing.insert(ticker);
        self
    }

    /// Tickers requested so far, in call order.
    pub fn requested(&self) -> Vec<Ticker> {
        self.requested
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl NewsSource for FixtureNews {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn headlines<'a>(&'a self, ticker: &'a Ticker, max: usize) -> SourceFuture<'a, Vec<String>> {
        Box::pin(async move {
            self.requested
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(ticker.clone());

            if self.failing.contains(ticker) {
                return Err(SourceError::unavailable(format!(
                    "fixture news for {ticker} timed out"
                )));
            }

            Ok(self
                .headlines
                .get(ticker)
                .map(|items| items.iter().take(max).cloned().collect())
                .unwrap_or_default())
        })
    }
}
