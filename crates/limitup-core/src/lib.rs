//! # Limitup Core
//!
//! Finds, for one trading day, the highest-trading-value stock that closed
//! limit-up on each of the KOSPI and KOSDAQ boards, attaches recent
//! headlines, and writes the pair to a dated JSON artifact.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | KRX market data, Naver news, in-memory fixtures |
//! | [`assembler`] | Attaches headlines to segment winners |
//! | [`data_source`] | Provider traits and error type |
//! | [`domain`] | Ticker, trade date, segment, quote models |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pipeline`] | End-to-end run for a date |
//! | [`report`] | Run result and artifact writer |
//! | [`selector`] | Limit-up filter and per-segment winner |
//! | [`source`] | Provider identifiers |
//!
//! ## Flow
//!
//! ```text
//! MarketDataSource ──▶ LimitUpSelector ──▶ SegmentPicks
//!                                              │
//! NewsSource ─────────▶ ResultAssembler ◀──────┘
//!                              │
//!                              ▼
//!                 RunResult ──▶ up_stocks_<YYYYMMDD>.json
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use limitup_core::{run_for_date, FixtureMarketData, FixtureNews, RunConfig, TradeDate};
//!
//! let market = FixtureMarketData::sample();
//! let news = FixtureNews::sample();
//! let date = TradeDate::parse("20250618")?;
//! let outcome = run_for_date(&market, &news, &date, &RunConfig::default()).await?;
//! ```

pub mod adapters;
pub mod assembler;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pipeline;
pub mod report;
pub mod selector;
pub mod source;

pub use adapters::{FixtureMarketData, FixtureNews, KrxAdapter, NaverNewsAdapter};

pub use assembler::{ResultAssembler, DEFAULT_HEADLINE_LIMIT};

pub use data_source::{MarketDataSource, NewsSource, SourceError, SourceErrorKind};

pub use domain::{
    InstrumentQuote, LeadingDigitClassifier, LimitUpCandidate, Segment, SegmentClassifier,
    SegmentWinner, Ticker, TradeDate, ValueBasis, KST,
};

pub use error::ValidationError;

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use pipeline::{run_for_date, PipelineError, RunConfig, RunOutcome};

pub use report::{output_file_name, write_report, ReportError, RunResult};

pub use selector::{
    select_winners, LimitUpSelector, SegmentPicks, SelectorConfig,
    LIMIT_UP_THRESHOLD_PCT,
};

pub use source::ProviderId;
