//! Error types for the retrieval client.

use thiserror::Error;

use findata_catalog::{CatalogError, SearchField};

/// Result type alias using the client error type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced while resolving products or retrieving upstream data
#[derive(Error, Debug)]
pub enum ClientError {
    /// The catalog rejected the query before any network work started
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Resolution required exactly one catalog match and found none
    #[error("No match for {field} `{value}`")]
    NotFound {
        /// Field the lookup ran against
        field: SearchField,
        /// Value that matched nothing
        value: String,
    },

    /// Resolution required exactly one catalog match and found several
    #[error("{count} matches for {field} `{value}`; add a country or kind filter")]
    Ambiguous {
        /// Field the lookup ran against
        field: SearchField,
        /// Value that matched more than one record
        value: String,
        /// How many records matched
        count: usize,
    },

    /// The requested window is reversed or ends in the future
    #[error("Invalid date range: {reason}")]
    InvalidDateRange {
        /// Which constraint the window violates
        reason: String,
    },

    /// A transport-level failure while talking to the upstream site
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream site answered with a non-success HTTP status
    #[error("Upstream returned HTTP {status}")]
    Status {
        /// Status code of the failed response
        status: reqwest::StatusCode,
    },

    /// The response body did not have the shape the parser expects
    #[error("Scrape error: {reason}")]
    Scrape {
        /// What was missing or malformed
        reason: String,
    },

    /// The upstream site reported no rows for the requested window
    #[error("No data for `{name}` in the requested window")]
    NoData {
        /// Display name of the product the request was for
        name: String,
    },
}
