use findata_catalog::ProductKind;
use serde::{Deserialize, Serialize};

/// One product discovered through the live search endpoint.
///
/// Unlike catalog records these are found at request time, so they can cover
/// products the bundled datasets do not know about. The pair id alone is
/// enough to retrieve candles for the hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteHit {
    /// Upstream numeric instrument id.
    pub pair_id: u64,
    /// Display name.
    pub name: String,
    /// Ticker symbol as the site shows it.
    pub symbol: String,
    /// Home country derived from the site's flag token, when one is carried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Product classification derived from the site's pair-type token.
    pub kind: ProductKind,
    /// Exchange the product trades on.
    pub exchange: String,
    /// URL slug of the product page, usable as a stable identifier.
    pub tag: String,
}
