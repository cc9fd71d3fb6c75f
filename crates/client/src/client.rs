//! The blocking retrieval client.
//!
//! Ties the catalog and the upstream endpoints together:
//!
//! 1. resolve an identifier to exactly one catalog record
//! 2. build the request form the endpoint expects for that record
//! 3. retrieve and parse the answer into typed candles or hits
//!
//! The client holds an explicit `Arc<Catalog>` handle; nothing here reaches
//! for global state, so tests and embedders can hand in their own catalog
//! and their own base URL.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use log::debug;
use reqwest::blocking;
use reqwest::header;

use findata_catalog::{Catalog, CatalogError, ProductKind, ProductRecord, SearchField, SearchQuery};

use crate::errors::{ClientError, Result};
use crate::history;
use crate::http;
use crate::models::{Candle, Interval, PriceHistory, QuoteHit};
use crate::quotes;

/// Blocking client for Investing.com historical data and live search.
#[derive(Debug, Clone)]
pub struct InvestingClient {
    http: blocking::Client,
    base_url: String,
    catalog: Arc<Catalog>,
}

impl InvestingClient {
    /// Create a client over the given catalog handle, talking to the
    /// production site.
    pub fn new(catalog: Arc<Catalog>) -> Result<Self> {
        let http = blocking::Client::builder()
            .default_headers(http::default_headers())
            .build()?;
        Ok(InvestingClient {
            http,
            base_url: http::BASE_URL.to_string(),
            catalog,
        })
    }

    /// Redirect every request to another base URL. Meant for tests and
    /// proxies; the path layout stays the same.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The catalog this client resolves identifiers against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve an identifier to exactly one catalog record.
    ///
    /// Retrieval endpoints need a single pair id, so unlike a plain catalog
    /// search this insists on exactly one match.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] when nothing matches.
    /// - [`ClientError::Ambiguous`] when several records match; narrowing
    ///   with `country` or `kind` usually settles it.
    pub fn resolve(
        &self,
        field: SearchField,
        value: &str,
        country: Option<&str>,
        kind: Option<ProductKind>,
    ) -> Result<ProductRecord> {
        let mut query = SearchQuery::new(field, value);
        if let Some(country) = country {
            query = query.with_country(country);
        }
        if let Some(kind) = kind {
            query = query.with_kind(kind);
        }
        let mut records = self.catalog.search(&query)?.into_vec();
        if records.len() > 1 {
            return Err(ClientError::Ambiguous {
                field,
                value: value.to_string(),
                count: records.len(),
            });
        }
        records.pop().ok_or_else(|| ClientError::NotFound {
            field,
            value: value.to_string(),
        })
    }

    /// Retrieve the most recent candles for a resolved record. The window
    /// is whatever the site serves by default, roughly the last month.
    pub fn recent(&self, record: &ProductRecord, interval: Interval) -> Result<PriceHistory> {
        let header = history::header_for(record);
        let form = history::recent_form(record.pair_id, &header, interval);
        let candles = self.fetch_candles(&form, &record.name)?;
        Ok(PriceHistory::new(
            record.name.clone(),
            record.currency.clone(),
            candles,
        ))
    }

    /// Retrieve candles for a resolved record over an explicit date window.
    ///
    /// The window is validated before any network work and transparently
    /// split into the sub-windows the endpoint is willing to serve.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidDateRange`] when the window is reversed,
    ///   empty or ends in the future.
    /// - [`ClientError::NoData`] when the site has no rows anywhere in the
    ///   window.
    pub fn history(
        &self,
        record: &ProductRecord,
        from: NaiveDate,
        to: NaiveDate,
        interval: Interval,
    ) -> Result<PriceHistory> {
        validate_range(from, to)?;
        let header = history::header_for(record);
        let candles = self.fetch_range(record.pair_id, &header, &record.name, from, to, interval)?;
        Ok(PriceHistory::new(
            record.name.clone(),
            record.currency.clone(),
            candles,
        ))
    }

    /// Resolve a symbol and retrieve its recent candles in one call.
    pub fn recent_by_symbol(
        &self,
        symbol: &str,
        country: Option<&str>,
        interval: Interval,
    ) -> Result<PriceHistory> {
        let record = self.resolve(SearchField::Symbol, symbol, country, None)?;
        self.recent(&record, interval)
    }

    /// Resolve a symbol and retrieve candles for a date window in one call.
    pub fn history_by_symbol(
        &self,
        symbol: &str,
        country: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
        interval: Interval,
    ) -> Result<PriceHistory> {
        let record = self.resolve(SearchField::Symbol, symbol, country, None)?;
        self.history(&record, from, to, interval)
    }

    /// Search the live quotes endpoint for products matching free text.
    ///
    /// Pages are fetched until the site runs out of matches or `limit` hits
    /// survive the filters. Zero surviving hits is an empty vector, not an
    /// error.
    pub fn search_quotes(
        &self,
        text: &str,
        countries: Option<&[String]>,
        kinds: Option<&[ProductKind]>,
        limit: Option<usize>,
    ) -> Result<Vec<QuoteHit>> {
        if text.trim().is_empty() {
            return Err(ClientError::Catalog(CatalogError::InvalidQuery));
        }

        let url = format!("{}{}", self.base_url, http::SEARCH_ENDPOINT);
        let mut hits: Vec<QuoteHit> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        let mut offset: u64 = 0;
        loop {
            let form = [
                ("search_text", text.to_string()),
                ("tab", "quotes".to_string()),
                ("limit", http::SEARCH_PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
            ];
            debug!("POST {url} search `{text}` offset {offset}");
            let response = self
                .http
                .post(&url)
                .header(header::USER_AGENT, http::random_user_agent())
                .form(&form)
                .send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status { status });
            }
            let page: quotes::SearchResponse =
                response.json().map_err(|err| ClientError::Scrape {
                    reason: format!("search response was not valid JSON: {err}"),
                })?;

            let total = page.total.quotes;
            let page_len = page.quotes.len();
            for hit in quotes::collect_hits(page.quotes, countries, kinds) {
                // Cross-listings can reappear on later pages.
                if seen.insert(hit.pair_id) {
                    hits.push(hit);
                }
            }
            if let Some(limit) = limit {
                if hits.len() >= limit {
                    hits.truncate(limit);
                    return Ok(hits);
                }
            }
            offset += http::SEARCH_PAGE_SIZE;
            if page_len == 0 || offset >= total {
                return Ok(hits);
            }
        }
    }

    /// Retrieve the most recent candles for a live-search hit.
    pub fn recent_for_hit(&self, hit: &QuoteHit, interval: Interval) -> Result<PriceHistory> {
        let header = history::header_for_hit(hit);
        let form = history::recent_form(hit.pair_id, &header, interval);
        let candles = self.fetch_candles(&form, &hit.name)?;
        Ok(PriceHistory::new(hit.name.clone(), None, candles))
    }

    /// Retrieve candles for a live-search hit over an explicit date window.
    pub fn history_for_hit(
        &self,
        hit: &QuoteHit,
        from: NaiveDate,
        to: NaiveDate,
        interval: Interval,
    ) -> Result<PriceHistory> {
        validate_range(from, to)?;
        let header = history::header_for_hit(hit);
        let candles = self.fetch_range(hit.pair_id, &header, &hit.name, from, to, interval)?;
        Ok(PriceHistory::new(hit.name.clone(), None, candles))
    }

    /// Fetch every sub-window of a date range and merge the candles.
    fn fetch_range(
        &self,
        pair_id: u64,
        header: &str,
        name: &str,
        from: NaiveDate,
        to: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<Candle>> {
        let mut candles = Vec::new();
        for (start, end) in history::chunk_ranges(from, to) {
            let form = history::historical_form(pair_id, header, start, end, interval);
            match self.fetch_candles(&form, name) {
                Ok(mut chunk) => candles.append(&mut chunk),
                // A sub-window that predates the product's listing has no
                // rows; that only becomes an error if every window is empty.
                Err(ClientError::NoData { .. }) => continue,
                Err(err) => return Err(err),
            }
        }
        if candles.is_empty() {
            return Err(ClientError::NoData {
                name: name.to_string(),
            });
        }
        Ok(candles)
    }

    /// POST one historical-data form and parse the table it answers with.
    fn fetch_candles(&self, form: &[(&'static str, String)], name: &str) -> Result<Vec<Candle>> {
        let url = format!("{}{}", self.base_url, http::HISTORY_ENDPOINT);
        debug!("POST {url} for `{name}`");
        let response = self
            .http
            .post(&url)
            .header(header::USER_AGENT, http::random_user_agent())
            .form(&form)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { status });
        }
        let body = response.text()?;
        history::parse_history_html(&body, name)
    }
}

/// Windows must run forward and must not reach into the future; the site
/// answers such requests with misleading, partially-filled tables.
fn validate_range(from: NaiveDate, to: NaiveDate) -> Result<()> {
    if from >= to {
        return Err(ClientError::InvalidDateRange {
            reason: format!("start {from} must be before end {to}"),
        });
    }
    let today = Utc::now().date_naive();
    if to > today {
        return Err(ClientError::InvalidDateRange {
            reason: format!("end {to} is in the future"),
        });
    }
    Ok(())
}
