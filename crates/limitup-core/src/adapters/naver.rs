use std::sync::Arc;

use scraper::{Html, Selector};

use crate::data_source::{NewsSource, SourceError, SourceFuture};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{ProviderId, Ticker};

const NAVER_NEWS_URL: &str = "https://finance.naver.com/item/news.naver";

/// Headline selectors in preference order. The first one that matches wins.
const HEADLINE_SELECTORS: [&str; 2] = [".newsList li > a", "table.type5 td.title > a"];

/// Naver Finance per-instrument news page scraper.
#[derive(Clone)]
pub struct NaverNewsAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl Default for NaverNewsAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::default()))
    }
}

impl NaverNewsAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl NewsSource for NaverNewsAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Naver
    }

    fn headlines<'a>(&'a self, ticker: &'a Ticker, max: usize) -> SourceFuture<'a, Vec<String>> {
        Box::pin(async move {
            if max == 0 {
                return Ok(Vec::new());
            }

            let url = format!(
                "{NAVER_NEWS_URL}?code={}",
                urlencoding::encode(ticker.as_str())
            );
            let request = HttpRequest::get(url)
                .with_header("referer", "https://finance.naver.com/")
                .with_timeout_ms(self.timeout_ms);

            let response = self
                .http_client
                .execute(request)
                .await
                .map_err(|error| SourceError::from_transport(ProviderId::Naver, &error))?;

            if !response.is_success() {
                return Err(SourceError::unavailable(format!(
                    "naver returned status {} for {ticker}",
                    response.status
                )));
            }

            extract_headlines(&response.body, max)
        })
    }
}

/// Pull up to `max` trimmed, non-empty anchor texts out of a news page.
pub fn extract_headlines(html: &str, max: usize) -> Result<Vec<String>, SourceError> {
    let document = Html::parse_document(html);

    for raw in HEADLINE_SELECTORS {
        let selector = Selector::parse(raw)
            .map_err(|e| SourceError::internal(format!("invalid headline selector '{raw}': {e:?}")))?;

        let headlines: Vec<String> = document
            .select(&selector)
            .map(|anchor| {
                anchor
                    .text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|text| !text.is_empty())
            .take(max)
            .collect();

        if !headlines.is_empty() {
            return Ok(headlines);
        }
    }

    Ok(Vec::new())
}
