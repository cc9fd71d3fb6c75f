//! Error types for catalog loading and resolution.

use thiserror::Error;

use crate::models::{ProductKind, SearchField};

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or querying the catalog.
///
/// Resolution performs no I/O, so there is nothing to retry: every variant
/// is surfaced synchronously to the immediate caller.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The query value was empty or all whitespace.
    #[error("Invalid query: value must be a non-empty string")]
    InvalidQuery,

    /// The requested field is not a lookup key for the given product kind.
    /// Only reachable when the query carries an explicit kind filter;
    /// unfiltered scans simply skip kinds the field does not apply to.
    #[error("Unknown field: {kind} products cannot be searched by {field}")]
    UnknownField {
        /// The field the query asked for
        field: SearchField,
        /// The kind the query was restricted to
        kind: ProductKind,
    },

    /// A dataset failed to parse while building a catalog.
    #[error("Dataset error for {kind}: {source}")]
    Dataset {
        /// The kind whose dataset was being read
        kind: ProductKind,
        /// The underlying CSV error
        #[source]
        source: csv::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_display() {
        let error = CatalogError::InvalidQuery;
        assert_eq!(
            format!("{}", error),
            "Invalid query: value must be a non-empty string"
        );
    }

    #[test]
    fn test_unknown_field_display() {
        let error = CatalogError::UnknownField {
            field: SearchField::Isin,
            kind: ProductKind::Index,
        };
        assert_eq!(
            format!("{}", error),
            "Unknown field: index products cannot be searched by isin"
        );
    }
}
