use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ProductKind, ProductRecord};

/// Identifier field a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Substring match over display and full legal names.
    Name,
    /// Exact match over ticker symbols.
    Symbol,
    /// Exact match over ISINs.
    Isin,
}

impl SearchField {
    /// Stable lower-case label, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Symbol => "symbol",
            Self::Isin => "isin",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog lookup request.
///
/// `value` must be non-empty. `country` and `kind` narrow the candidate set
/// before any field comparison happens; both are matched case- and
/// diacritic-insensitively, like the value itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Field the value is compared against.
    pub field: SearchField,

    /// The user-supplied identifier.
    pub value: String,

    /// Restrict matches to this country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Restrict matches to this product kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProductKind>,
}

impl SearchQuery {
    /// Create an unfiltered query.
    pub fn new(field: SearchField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            country: None,
            kind: None,
        }
    }

    /// Restrict matches to a country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Restrict matches to a product kind.
    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Ordered catalog matches for one query, in catalog insertion order.
///
/// An empty set means "not found", which is not an error by itself; callers
/// that need exactly one match decide how to treat zero or many. Serializes
/// as a plain JSON array of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResults {
    records: Vec<ProductRecord>,
}

impl SearchResults {
    /// Number of matched records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The matches, in catalog insertion order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// First match, if any.
    pub fn first(&self) -> Option<&ProductRecord> {
        self.records.first()
    }

    /// Iterate over the matches.
    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.records.iter()
    }

    /// Consume the results into the underlying vector.
    pub fn into_vec(self) -> Vec<ProductRecord> {
        self.records
    }
}

impl From<Vec<ProductRecord>> for SearchResults {
    fn from(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for SearchResults {
    type Item = ProductRecord;
    type IntoIter = std::vec::IntoIter<ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
