use serde::{Deserialize, Serialize};

use super::ProductKind;

/// One catalog entry: a single tradable product in a single country/market.
///
/// The same display name may legitimately appear under several countries
/// (cross-listed products); `(kind, country, symbol)` is what identifies a
/// record. Records are immutable once a catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product classification.
    pub kind: ProductKind,

    /// Home market, lower-cased. Absent for kinds without one (crypto,
    /// commodities, currency crosses).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Short display name (e.g., "BBVA").
    pub name: String,

    /// Full legal name (e.g., "Banco Bilbao Vizcaya Argentaria S.A.").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Ticker symbol, when the kind carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// ISIN, when assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,

    /// Default quote currency (e.g., "EUR").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// URL slug the upstream site routes this product under.
    pub tag: String,

    /// Upstream numeric instrument id; keys all data retrieval.
    pub pair_id: u64,
}

impl ProductRecord {
    /// Create a record with the required fields.
    pub fn new(
        kind: ProductKind,
        name: impl Into<String>,
        tag: impl Into<String>,
        pair_id: u64,
    ) -> Self {
        Self {
            kind,
            country: None,
            name: name.into(),
            full_name: None,
            symbol: None,
            isin: None,
            currency: None,
            tag: tag.into(),
            pair_id,
        }
    }

    /// Set the home country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the full legal name.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Set the ticker symbol.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the ISIN.
    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    /// Set the default quote currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let record = ProductRecord::new(ProductKind::Stock, "BBVA", "bbva", 421)
            .with_country("spain")
            .with_full_name("Banco Bilbao Vizcaya Argentaria S.A.")
            .with_symbol("BBVA")
            .with_isin("ES0113211835")
            .with_currency("EUR");

        assert_eq!(record.kind, ProductKind::Stock);
        assert_eq!(record.country.as_deref(), Some("spain"));
        assert_eq!(record.symbol.as_deref(), Some("BBVA"));
        assert_eq!(record.isin.as_deref(), Some("ES0113211835"));
        assert_eq!(record.pair_id, 421);
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let record = ProductRecord::new(ProductKind::Crypto, "Bitcoin", "bitcoin", 945_629)
            .with_symbol("BTC")
            .with_currency("USD");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "crypto");
        assert_eq!(json["symbol"], "BTC");
        assert!(json.get("country").is_none());
        assert!(json.get("isin").is_none());
    }
}
