mod run;

use limitup_core::{
    FixtureMarketData, FixtureNews, KrxAdapter, MarketDataSource, NaverNewsAdapter, NewsSource,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let (market, news) = providers(cli);

    match &cli.command {
        Command::Run(args) => run::run(args, &*market, &*news).await,
    }
}

fn providers(cli: &Cli) -> (Box<dyn MarketDataSource>, Box<dyn NewsSource>) {
    if cli.mock {
        (
            Box::new(FixtureMarketData::sample()),
            Box::new(FixtureNews::sample()),
        )
    } else {
        (
            Box::new(KrxAdapter::default().with_timeout_ms(cli.timeout_ms)),
            Box::new(NaverNewsAdapter::default().with_timeout_ms(cli.timeout_ms)),
        )
    }
}
