use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use tracing::{debug, info};

use crate::data_source::{MarketDataSource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{InstrumentQuote, ProviderId, Ticker, TradeDate};

const KRX_JSON_ENDPOINT: &str = "http://data.krx.co.kr/comm/bldAttendant/getJsonData.cmd";
const KRX_REFERER: &str =
    "http://data.krx.co.kr/contents/MDC/MDI/mdiLoader/index.cmd?menuId=MDC0201020101";
/// All-listed-stocks daily price screen.
const ALL_STOCKS_DAILY_BLD: &str = "dbms/MDC/STAT/standard/MDCSTAT01501";

/// KRX data-portal market data adapter.
///
/// The portal serves the whole market's daily figures in one response, so the
/// adapter downloads the snapshot for a date once and answers per-instrument
/// lookups from memory for the remainder of the run.
#[derive(Clone)]
pub struct KrxAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
    snapshot: Arc<Mutex<Option<Arc<DailySnapshot>>>>,
}

impl Default for KrxAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::default()))
    }
}

impl KrxAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            snapshot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn cached(&self, date: &TradeDate) -> Option<Arc<DailySnapshot>> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|snapshot| snapshot.date == *date)
            .cloned()
    }

    fn latest(&self) -> Option<Arc<DailySnapshot>> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn snapshot_for(&self, date: &TradeDate) -> Result<Arc<DailySnapshot>, SourceError> {
        if let Some(snapshot) = self.cached(date) {
            return Ok(snapshot);
        }

        let compact = date.as_compact();
        let request = HttpRequest::post(KRX_JSON_ENDPOINT)
            .with_header("referer", KRX_REFERER)
            .with_form(&[
                ("bld", ALL_STOCKS_DAILY_BLD),
                ("locale", "ko_KR"),
                ("mktId", "ALL"),
                ("trdDd", compact.as_str()),
                ("share", "1"),
                ("money", "1"),
                ("csvxls_isNo", "false"),
            ])
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| SourceError::from_transport(ProviderId::Krx, &error))?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "krx returned status {}",
                response.status
            )));
        }

        let snapshot = Arc::new(parse_daily_snapshot(*date, &response.body)?);
        info!(
            date = %date,
            instruments = snapshot.quotes.len(),
            "loaded krx daily snapshot"
        );

        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(snapshot)
    }
}

impl MarketDataSource for KrxAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Krx
    }

    fn list_instruments<'a>(&'a self, date: &'a TradeDate) -> SourceFuture<'a, Vec<Ticker>> {
        Box::pin(async move {
            let snapshot = self.snapshot_for(date).await?;
            Ok(snapshot
                .quotes
                .iter()
                .map(|quote| quote.ticker.clone())
                .collect())
        })
    }

    fn daily_quote<'a>(
        &'a self,
        date: &'a TradeDate,
        ticker: &'a Ticker,
    ) -> SourceFuture<'a, Option<InstrumentQuote>> {
        Box::pin(async move {
            let snapshot = self.snapshot_for(date).await?;
            Ok(snapshot.get(ticker).cloned())
        })
    }

    fn display_name<'a>(&'a self, ticker: &'a Ticker) -> SourceFuture<'a, String> {
        Box::pin(async move {
            let snapshot = self.latest().ok_or_else(|| {
                SourceError::invalid_request("krx names are available after a daily listing")
            })?;
            snapshot
                .get(ticker)
                .map(|quote| quote.name.clone())
                .ok_or_else(|| SourceError::invalid_request(format!("krx has no listing for {ticker}")))
        })
    }
}

/// One trading day of parsed KRX rows, in portal order.
#[derive(Debug)]
struct DailySnapshot {
    date: TradeDate,
    quotes: Vec<InstrumentQuote>,
    by_ticker: HashMap<Ticker, usize>,
}

impl DailySnapshot {
    fn get(&self, ticker: &Ticker) -> Option<&InstrumentQuote> {
        self.by_ticker
            .get(ticker)
            .and_then(|index| self.quotes.get(*index))
    }
}

#[derive(Debug, Deserialize)]
struct KrxDailyResponse {
    #[serde(rename = "OutBlock_1")]
    rows: Vec<KrxDailyRow>,
}

#[derive(Debug, Deserialize)]
struct KrxDailyRow {
    #[serde(rename = "ISU_SRT_CD")]
    short_code: String,
    #[serde(rename = "ISU_ABBRV", default)]
    name: String,
    #[serde(rename = "TDD_OPNPRC", default)]
    open: String,
    #[serde(rename = "TDD_CLSPRC", default)]
    close: String,
    #[serde(rename = "FLUC_RT", default)]
    change_rate: String,
    #[serde(rename = "ACC_TRDVOL", default)]
    volume: String,
    #[serde(rename = "ACC_TRDVAL", default)]
    value: String,
}

fn parse_daily_snapshot(date: TradeDate, body: &str) -> Result<DailySnapshot, SourceError> {
    let response: KrxDailyResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed_response(format!("failed to parse krx response: {e}")))?;

    let mut quotes = Vec::with_capacity(response.rows.len());
    let mut by_ticker = HashMap::with_capacity(response.rows.len());

    for row in response.rows {
        let Some(quote) = row_to_quote(row) else {
            continue;
        };
        if by_ticker.contains_key(&quote.ticker) {
            continue;
        }
        by_ticker.insert(quote.ticker.clone(), quotes.len());
        quotes.push(quote);
    }

    Ok(DailySnapshot {
        date,
        quotes,
        by_ticker,
    })
}

fn row_to_quote(row: KrxDailyRow) -> Option<InstrumentQuote> {
    let ticker = match Ticker::parse(&row.short_code) {
        Ok(ticker) => ticker,
        Err(error) => {
            debug!(code = %row.short_code, %error, "skipping krx row with unusable code");
            return None;
        }
    };

    let close = parse_grouped_u64(&row.close)?;
    let volume = parse_grouped_u64(&row.volume).unwrap_or(0);
    // Suspended or not-yet-listed rows carry no trade for the day.
    if close == 0 && volume == 0 {
        return None;
    }

    let open = parse_grouped_u64(&row.open).unwrap_or(0);
    let pct_chg = parse_grouped_f64(&row.change_rate)?;

    InstrumentQuote::new(ticker, row.name.trim(), open, close, pct_chg, volume)
        .ok()
        .map(|quote| quote.with_reported_value(parse_grouped_u64(&row.value)))
}

/// Parse KRX's comma-grouped integers. `-` and blanks mean "no figure".
fn parse_grouped_u64(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse().ok()
}

fn parse_grouped_f64(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse().ok()
}
