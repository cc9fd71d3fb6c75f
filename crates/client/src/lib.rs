//! # Findata Client Crate
//!
//! Blocking retrieval of financial market data from Investing.com.
//!
//! ## Overview
//!
//! This crate turns catalog records from `findata-catalog` into price data:
//!
//! - **Resolution**: map a symbol, ISIN or name to exactly one record
//! - **Recent data**: the site's default window of latest candles
//! - **Historical data**: an explicit date window, transparently split into
//!   the sub-windows the site is willing to serve
//! - **Live search**: free-text search over products the bundled catalog
//!   may not know, with retrieval directly from a hit
//!
//! All calls are blocking; hand the client to a worker thread if an
//! application cannot afford to wait on the network.
//!
//! ## Core Types
//!
//! - [`InvestingClient`]: the facade over resolution and retrieval
//! - [`PriceHistory`] / [`Candle`]: typed candle series, oldest first
//! - [`QuoteHit`]: one product discovered through the live search
//! - [`Interval`]: daily, weekly or monthly sampling
//! - [`ClientError`]: everything that can go wrong, from catalog misses to
//!   scrape failures

mod history;
mod http;
mod quotes;

pub mod client;
pub mod errors;
pub mod models;

pub use client::InvestingClient;
pub use errors::{ClientError, Result};
pub use models::{Candle, Interval, PriceHistory, QuoteHit};

// The catalog types appear throughout this crate's API; re-export them so
// callers do not have to depend on both crates for common flows.
pub use findata_catalog::{Catalog, ProductKind, ProductRecord, SearchField};
