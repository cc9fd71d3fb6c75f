//! The immutable record store and its query layer.
//!
//! A [`Catalog`] is built once (from the bundled dataset or via
//! [`CatalogBuilder`]) and never mutated afterwards, so a shared
//! `Arc<Catalog>` handle can serve concurrent lookups without locking.
//! There is no ambient global: callers hold the handle explicitly and
//! pass it to whatever consumes it.

use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::{CatalogError, Result};
use crate::models::{ProductKind, ProductRecord, SearchField, SearchQuery, SearchResults};
use crate::normalize;


/// The static reference catalog of financial products.
///
/// Lookups are linear scans in insertion order; with catalog sizes in the
/// tens of thousands that is cheap for a per-call operation, and it keeps
/// result ordering trivially stable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ProductRecord>,
}

impl Catalog {
    /// Start building a catalog from scratch.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Shared handle to the catalog bundled with this crate, loaded on
    /// first use and reused for the lifetime of the process.
    pub fn bundled() -> Arc<Catalog> {
        crate::dataset::bundled()
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// All records of one kind, in insertion order.
    pub fn records_of(&self, kind: ProductKind) -> impl Iterator<Item = &ProductRecord> {
        self.records.iter().filter(move |record| record.kind == kind)
    }

    /// Distinct countries that have at least one record of `kind`,
    /// deduplicated, in insertion order.
    pub fn countries_of(&self, kind: ProductKind) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut countries = Vec::new();
        for record in self.records_of(kind) {
            if let Some(country) = record.country.as_deref() {
                if seen.insert(country) {
                    countries.push(country);
                }
            }
        }
        countries
    }

    /// Resolve a query against the catalog.
    ///
    /// Matching is case- and diacritic-insensitive on both sides. Identifier
    /// fields (`symbol`, `isin`) match exactly; `name` matches as a substring
    /// of the display name or the full legal name. Country and kind filters
    /// restrict the candidate set before any field comparison.
    ///
    /// Matches come back in catalog insertion order with no relevance
    /// scoring, so identical queries over an unchanged catalog return
    /// identical, identically-ordered results. An unknown country filter
    /// yields an empty result, not an error.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidQuery`] if the query value is empty.
    /// - [`CatalogError::UnknownField`] if a kind filter is present and the
    ///   field is not a lookup key for that kind.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        if query.value.trim().is_empty() {
            return Err(CatalogError::InvalidQuery);
        }
        if let Some(kind) = query.kind {
            if !kind.supports(query.field) {
                return Err(CatalogError::UnknownField {
                    field: query.field,
                    kind,
                });
            }
        }

        let needle = normalize::fold(&query.value);
        let country = query.country.as_deref().map(normalize::fold);

        let mut matches = Vec::new();
        for record in &self.records {
            match query.kind {
                Some(kind) if record.kind != kind => continue,
                // Without a kind filter, skip kinds the field cannot apply to.
                None if !record.kind.supports(query.field) => continue,
                _ => {}
            }
            if let Some(want) = country.as_deref() {
                match record.country.as_deref() {
                    Some(have) if normalize::fold(have) == want => {}
                    _ => continue,
                }
            }
            if field_matches(record, query.field, &needle) {
                matches.push(record.clone());
            }
        }

        Ok(SearchResults::from(matches))
    }
}

/// Compare one record's field against an already-folded needle.
fn field_matches(record: &ProductRecord, field: SearchField, needle: &str) -> bool {
    match field {
        SearchField::Symbol => record
            .symbol
            .as_deref()
            .map_or(false, |symbol| normalize::fold(symbol) == needle),
        SearchField::Isin => record
            .isin
            .as_deref()
            .map_or(false, |isin| normalize::fold(isin) == needle),
        SearchField::Name => {
            normalize::fold(&record.name).contains(needle)
                || record
                    .full_name
                    .as_deref()
                    .map_or(false, |full| normalize::fold(full).contains(needle))
        }
    }
}

/// Accumulates records for a [`Catalog`]; insertion order is preserved and
/// becomes the result order of every search.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    records: Vec<ProductRecord>,
}

impl CatalogBuilder {
    /// Append one record.
    pub fn push(mut self, record: ProductRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Append a batch of records.
    pub fn extend(mut self, records: impl IntoIterator<Item = ProductRecord>) -> Self {
        self.records.extend(records);
        self
    }

    /// Finish building.
    pub fn build(self) -> Catalog {
        Catalog {
            records: self.records,
        }
    }

    /// Finish building and wrap the catalog for shared ownership.
    pub fn build_shared(self) -> Arc<Catalog> {
        Arc::new(self.build())
    }
}
