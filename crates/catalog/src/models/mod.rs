//! Catalog data models
//!
//! This module contains the core data types for catalog operations:
//! - `kind` - Product classification (ProductKind)
//! - `record` - Catalog entries (ProductRecord)
//! - `query` - Lookup requests and results (SearchField, SearchQuery, SearchResults)

mod kind;
mod query;
mod record;

pub use kind::ProductKind;
pub use query::{SearchField, SearchQuery, SearchResults};
pub use record::ProductRecord;
