use limitup_core::{
    run_for_date, MarketDataSource, NewsSource, RunConfig, RunOutcome, SelectorConfig, TradeDate,
};

use crate::cli::RunArgs;
use crate::error::CliError;

pub async fn run(
    args: &RunArgs,
    market: &dyn MarketDataSource,
    news: &dyn NewsSource,
) -> Result<(), CliError> {
    let date = resolve_date(args.date.as_deref())?;
    let config = RunConfig {
        selector: SelectorConfig {
            threshold_pct: args.threshold,
            value_basis: args.value_basis.into(),
        },
        headline_limit: args.headlines,
        output_dir: args.output_dir.clone(),
    };

    match run_for_date(market, news, &date, &config).await? {
        RunOutcome::NoCandidates => {
            println!("no limit-up stocks on {date}");
        }
        RunOutcome::Saved { path, .. } => {
            println!("saved → {}", path.display());
        }
    }

    Ok(())
}

/// Explicit `YYYYMMDD`, or today's exchange date when omitted.
fn resolve_date(raw: Option<&str>) -> Result<TradeDate, CliError> {
    match raw {
        Some(raw) => Ok(TradeDate::parse(raw)?),
        None => Ok(TradeDate::today_kst()),
    }
}
