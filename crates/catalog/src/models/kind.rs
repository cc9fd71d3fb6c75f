use std::fmt;

use serde::{Deserialize, Serialize};

use super::query::SearchField;

/// Classification of the products the catalog indexes.
///
/// Mirrors the product sections of the upstream site; each bundled dataset
/// file corresponds to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Stock,
    Fund,
    Etf,
    Index,
    CurrencyCross,
    Crypto,
    Bond,
    Commodity,
    Certificate,
}

impl ProductKind {
    /// All kinds, in the order the bundled datasets are loaded.
    pub const ALL: [ProductKind; 9] = [
        ProductKind::Stock,
        ProductKind::Fund,
        ProductKind::Etf,
        ProductKind::Index,
        ProductKind::CurrencyCross,
        ProductKind::Crypto,
        ProductKind::Bond,
        ProductKind::Commodity,
        ProductKind::Certificate,
    ];

    /// Stable lower-case label, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Fund => "fund",
            Self::Etf => "etf",
            Self::Index => "index",
            Self::CurrencyCross => "currency_cross",
            Self::Crypto => "crypto",
            Self::Bond => "bond",
            Self::Commodity => "commodity",
            Self::Certificate => "certificate",
        }
    }

    /// Whether `field` is a supported lookup key for this kind.
    ///
    /// Every kind is searchable by name. Symbol lookups require the kind's
    /// dataset to carry tickers (bonds and commodities have none), and ISIN
    /// lookups are limited to the kinds whose dataset records ISINs.
    pub fn supports(&self, field: SearchField) -> bool {
        match field {
            SearchField::Name => true,
            SearchField::Symbol => !matches!(self, Self::Bond | Self::Commodity),
            SearchField::Isin => matches!(
                self,
                Self::Stock | Self::Fund | Self::Etf | Self::Certificate
            ),
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_supports_name() {
        for kind in ProductKind::ALL {
            assert!(kind.supports(SearchField::Name), "{kind} should support name");
        }
    }

    #[test]
    fn test_symbol_support() {
        assert!(ProductKind::Stock.supports(SearchField::Symbol));
        assert!(ProductKind::CurrencyCross.supports(SearchField::Symbol));
        assert!(ProductKind::Certificate.supports(SearchField::Symbol));
        assert!(!ProductKind::Bond.supports(SearchField::Symbol));
        assert!(!ProductKind::Commodity.supports(SearchField::Symbol));
    }

    #[test]
    fn test_isin_support() {
        assert!(ProductKind::Stock.supports(SearchField::Isin));
        assert!(ProductKind::Fund.supports(SearchField::Isin));
        assert!(ProductKind::Etf.supports(SearchField::Isin));
        assert!(ProductKind::Certificate.supports(SearchField::Isin));
        assert!(!ProductKind::Index.supports(SearchField::Isin));
        assert!(!ProductKind::Bond.supports(SearchField::Isin));
        assert!(!ProductKind::Crypto.supports(SearchField::Isin));
    }

    #[test]
    fn test_serde_representation() {
        let json = serde_json::to_string(&ProductKind::CurrencyCross).unwrap();
        assert_eq!(json, "\"currency_cross\"");
        let kind: ProductKind = serde_json::from_str("\"etf\"").unwrap();
        assert_eq!(kind, ProductKind::Etf);
    }

    #[test]
    fn test_display_matches_as_str() {
        for kind in ProductKind::ALL {
            assert_eq!(format!("{kind}"), kind.as_str());
        }
    }
}
