//! Shared HTTP plumbing: endpoints, request headers and User-Agent rotation.

use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Production site every request is sent to unless a client overrides it.
pub(crate) const BASE_URL: &str = "https://www.investing.com";

/// Endpoint serving historical candles as an HTML table fragment.
pub(crate) const HISTORY_ENDPOINT: &str = "/instruments/HistoricalDataAjax";

/// Endpoint serving the live quotes search as JSON.
pub(crate) const SEARCH_ENDPOINT: &str = "/search/service/SearchInnerPage";

/// Page size the search endpoint serves per request.
pub(crate) const SEARCH_PAGE_SIZE: u64 = 270;

/// Real browser strings; one is drawn at random for every request so long
/// request series do not present a single fingerprint to the site.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.82 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:88.0) Gecko/20100101 Firefox/88.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:88.0) Gecko/20100101 Firefox/88.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36 Edg/90.0.818.51",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.182 Safari/537.36",
];

/// Pick a User-Agent for one request.
pub(crate) fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Headers shared by every request. The User-Agent is intentionally absent;
/// it is attached per request by the client.
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Random widget id the historical endpoint expects alongside the pair id.
pub(crate) fn random_sml_id() -> u64 {
    rand::thread_rng().gen_range(1_000_000..100_000_000)
}
