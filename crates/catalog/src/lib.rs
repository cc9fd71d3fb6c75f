//! Findata Catalog Crate
//!
//! The static reference catalog of financial products indexed on
//! Investing.com, together with the resolution layer that matches
//! user-supplied identifiers (name, symbol, ISIN) against it.
//!
//! # Overview
//!
//! The catalog crate supports:
//! - Nine product kinds: stocks, funds, ETFs, indices, currency crosses,
//!   cryptocurrencies, bonds, commodities, certificates
//! - Case- and diacritic-insensitive lookups over name, symbol and ISIN
//! - Country and product-kind filtering
//! - A bundled dataset compiled into the crate, loaded once per process
//!
//! # Core Types
//!
//! - [`Catalog`] - immutable record store plus the query layer
//! - [`ProductRecord`] - one catalog entry (one product in one market)
//! - [`SearchQuery`] - a lookup request (field, value, optional filters)
//! - [`SearchResults`] - ordered matches in catalog insertion order
//!
//! Searches never touch the network: resolution is a pure function over
//! data loaded once at startup, so any number of threads may query a
//! shared [`Catalog`] handle concurrently. An empty result set means
//! "not found" and is not an error.

pub mod catalog;
pub mod dataset;
pub mod errors;
pub mod models;
pub mod normalize;

// Re-export all public types from models
pub use models::{ProductKind, ProductRecord, SearchField, SearchQuery, SearchResults};

// Re-export catalog types
pub use catalog::{Catalog, CatalogBuilder};

// Re-export error types
pub use errors::{CatalogError, Result};
