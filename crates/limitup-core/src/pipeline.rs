//! One dated run: select, assemble, persist.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::assembler::{ResultAssembler, DEFAULT_HEADLINE_LIMIT};
use crate::data_source::{MarketDataSource, NewsSource, SourceError};
use crate::report::{write_report, ReportError};
use crate::selector::{LimitUpSelector, SelectorConfig};
use crate::{RunResult, TradeDate, ValidationError};

/// Run-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub selector: SelectorConfig,
    pub headline_limit: usize,
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            selector: SelectorConfig::default(),
            headline_limit: DEFAULT_HEADLINE_LIMIT,
            output_dir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.headline_limit == 0 {
            return Err(ValidationError::ZeroHeadlineLimit);
        }
        if !self.selector.threshold_pct.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "threshold_pct",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("market data unavailable: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No instrument closed limit-up; nothing was written.
    NoCandidates,
    Saved { path: PathBuf, result: RunResult },
}

/// Select, assemble and persist the limit-up winners for `date`.
pub async fn run_for_date(
    market: &dyn MarketDataSource,
    news: &dyn NewsSource,
    date: &TradeDate,
    config: &RunConfig,
) -> Result<RunOutcome, PipelineError> {
    config.validate()?;
    info!(date = %date, "limit-up run started");

    let picks = LimitUpSelector::new(config.selector)
        .select(market, date)
        .await?;
    if picks.is_empty() {
        info!(date = %date, "no limit-up candidates");
        return Ok(RunOutcome::NoCandidates);
    }

    let result = ResultAssembler::new(news, config.headline_limit)
        .assemble(picks)
        .await;
    let path = write_report(&config.output_dir, date, &result)?;

    Ok(RunOutcome::Saved { path, result })
}
