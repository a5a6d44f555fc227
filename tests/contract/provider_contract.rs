use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use limitup_core::{
    FixtureMarketData, FixtureNews, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse,
    InstrumentQuote, KrxAdapter, MarketDataSource, NaverNewsAdapter, NewsSource, ProviderId,
    SourceErrorKind, Ticker, TradeDate,
};

const KRX_BODY: &str = r#"{"OutBlock_1":[
    {"ISU_SRT_CD":"005930","ISU_ABBRV":"삼성전자","TDD_CLSPRC":"100","FLUC_RT":"30.00","TDD_OPNPRC":"77","ACC_TRDVOL":"10","ACC_TRDVAL":"990"},
    {"ISU_SRT_CD":"950130","ISU_ABBRV":"엑세스바이오","TDD_CLSPRC":"50","FLUC_RT":"29.50","TDD_OPNPRC":"39","ACC_TRDVOL":"100","ACC_TRDVAL":"5,100"},
    {"ISU_SRT_CD":"000020","ISU_ABBRV":"거래정지","TDD_CLSPRC":"-","FLUC_RT":"-","TDD_OPNPRC":"-","ACC_TRDVOL":"0","ACC_TRDVAL":"0"}
]}"#;

const NAVER_BODY: &str = r#"<html><body><ul class="newsList">
    <li><a href="/1">하나</a></li><li><a href="/2">둘</a></li>
    <li><a href="/3">셋</a></li><li><a href="/4">넷</a></li>
</ul></body></html>"#;

/// Answers by URL prefix and records every request.
#[derive(Default)]
struct ScriptedHttpClient {
    routes: Vec<(String, Result<HttpResponse, HttpError>)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    fn route(mut self, prefix: &str, response: Result<HttpResponse, HttpError>) -> Self {
        self.routes.push((prefix.to_owned(), response));
        self
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let answer = self
                .routes
                .iter()
                .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| Ok(HttpResponse { status: 404, body: String::new() }));
            self.requests.lock().expect("lock").push(request);
            answer
        })
    }
}

struct MarketCase {
    id: ProviderId,
    source: Arc<dyn MarketDataSource>,
}

fn market_cases() -> Vec<MarketCase> {
    let krx_client = Arc::new(
        ScriptedHttpClient::default()
            .route("http://data.krx.co.kr", Ok(HttpResponse::ok(KRX_BODY))),
    );
    let fixture = FixtureMarketData::new(vec![
        quote("005930", "삼성전자", 77, 100, 30.0, 10),
        quote("950130", "엑세스바이오", 39, 50, 29.5, 100),
    ])
    .with_missing(ticker("000020"));

    vec![
        MarketCase {
            id: ProviderId::Krx,
            source: Arc::new(KrxAdapter::with_http_client(krx_client)),
        },
        MarketCase {
            id: ProviderId::Fixture,
            source: Arc::new(fixture),
        },
    ]
}

fn ticker(code: &str) -> Ticker {
    Ticker::parse(code).expect("valid ticker")
}

fn quote(code: &str, name: &str, open: u64, close: u64, pct: f64, volume: u64) -> InstrumentQuote {
    InstrumentQuote::new(ticker(code), name, open, close, pct, volume).expect("valid quote")
}

fn date() -> TradeDate {
    TradeDate::parse("20250618").expect("valid date")
}

#[test]
fn market_sources_report_their_identity() {
    for case in market_cases() {
        assert_eq!(case.source.id(), case.id);
    }
}

#[test]
fn listing_preserves_provider_order() {
    for case in market_cases() {
        let tickers = block_on(case.source.list_instruments(&date()))
            .unwrap_or_else(|error| panic!("provider '{}' listing failed: {error}", case.id));
        let codes: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();

        assert_eq!(&codes[..2], ["005930", "950130"], "provider '{}'", case.id);
    }
}

#[test]
fn daily_quote_returns_figures_or_none() {
    for case in market_cases() {
        let date = date();
        let _ = block_on(case.source.list_instruments(&date));

        let found = block_on(case.source.daily_quote(&date, &ticker("950130")))
            .unwrap_or_else(|error| panic!("provider '{}' quote failed: {error}", case.id))
            .unwrap_or_else(|| panic!("provider '{}': quote present", case.id));
        assert_eq!(found.close, 50, "provider '{}': close", case.id);
        assert_eq!(found.open, 39, "provider '{}': open", case.id);
        assert_eq!(found.volume, 100, "provider '{}': volume", case.id);
        assert_eq!(found.pct_chg, 29.5, "provider '{}': pct", case.id);

        let missing = block_on(case.source.daily_quote(&date, &ticker("000020")))
            .unwrap_or_else(|error| panic!("provider '{}' quote failed: {error}", case.id));
        assert!(missing.is_none(), "provider '{}': sparse row is None", case.id);
    }
}

#[test]
fn display_name_resolves_after_listing() {
    for case in market_cases() {
        let _ = block_on(case.source.list_instruments(&date()));
        let name = block_on(case.source.display_name(&ticker("005930")))
            .unwrap_or_else(|error| panic!("provider '{}' name failed: {error}", case.id));
        assert_eq!(name, "삼성전자", "provider '{}'", case.id);
    }
}

#[test]
fn krx_downloads_one_snapshot_per_date() {
    let client = Arc::new(
        ScriptedHttpClient::default()
            .route("http://data.krx.co.kr", Ok(HttpResponse::ok(KRX_BODY))),
    );
    let adapter = KrxAdapter::with_http_client(client.clone());
    let date = date();

    let tickers = block_on(adapter.list_instruments(&date)).expect("listing");
    for ticker in &tickers {
        let _ = block_on(adapter.daily_quote(&date, ticker)).expect("quote");
    }

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].timeout_ms, 10_000);
    assert!(requests[0]
        .body
        .as_deref()
        .is_some_and(|body| body.contains("trdDd=20250618") && body.contains("mktId=ALL")));
}

#[test]
fn krx_keeps_reported_trading_value() {
    let client = Arc::new(
        ScriptedHttpClient::default()
            .route("http://data.krx.co.kr", Ok(HttpResponse::ok(KRX_BODY))),
    );
    let adapter = KrxAdapter::with_http_client(client);

    let quote = block_on(adapter.daily_quote(&date(), &ticker("950130")))
        .expect("quote")
        .expect("present");
    assert_eq!(quote.reported_value, Some(5_100));
}

#[test]
fn krx_listing_outage_is_a_hard_error() {
    let client = Arc::new(
        ScriptedHttpClient::default()
            .route("http://data.krx.co.kr", Err(HttpError::timeout("deadline elapsed"))),
    );
    let adapter = KrxAdapter::with_http_client(client);

    let error = block_on(adapter.list_instruments(&date())).expect_err("must fail");
    assert_eq!(error.kind(), SourceErrorKind::Unavailable);
    assert!(error.message().contains("timed out"));
}

#[test]
fn news_sources_cap_and_keep_order() {
    let naver_client = Arc::new(
        ScriptedHttpClient::default()
            .route("https://finance.naver.com", Ok(HttpResponse::ok(NAVER_BODY))),
    );
    let fixture = FixtureNews::new().with_headlines(
        ticker("005930"),
        ["하나", "둘", "셋", "넷"].map(String::from).to_vec(),
    );
    let sources: Vec<Arc<dyn NewsSource>> = vec![
        Arc::new(NaverNewsAdapter::with_http_client(naver_client.clone())),
        Arc::new(fixture),
    ];

    for source in sources {
        let headlines = block_on(source.headlines(&ticker("005930"), 3))
            .unwrap_or_else(|error| panic!("provider '{}' news failed: {error}", source.id()));
        assert_eq!(headlines, vec!["하나", "둘", "셋"], "provider '{}'", source.id());
    }

    let requests = naver_client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://finance.naver.com/item/news.naver?code=005930"
    );
}

#[test]
fn naver_non_success_status_is_unavailable() {
    let client = Arc::new(ScriptedHttpClient::default().route(
        "https://finance.naver.com",
        Ok(HttpResponse {
            status: 503,
            body: String::new(),
        }),
    ));
    let adapter = NaverNewsAdapter::with_http_client(client);

    let error = block_on(adapter.headlines(&ticker("005930"), 3)).expect_err("must fail");
    assert_eq!(error.kind(), SourceErrorKind::Unavailable);
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

unsafe fn noop_raw_waker_drop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake_by_ref,
    noop_raw_waker_drop,
);
