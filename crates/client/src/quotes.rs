//! Live search against the upstream quotes endpoint.
//!
//! The endpoint pages through matches as JSON. Country and kind filters are
//! applied client-side after each page arrives, the same way the site's own
//! search page narrows results.

use log::debug;
use serde::{Deserialize, Deserializer};

use findata_catalog::{normalize, ProductKind};

use crate::models::QuoteHit;

/// One page of the search endpoint's JSON answer.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub total: SearchTotal,
    #[serde(default)]
    pub quotes: Vec<RawQuote>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchTotal {
    pub quotes: u64,
}

/// One hit exactly as the wire carries it.
#[derive(Debug, Deserialize)]
pub(crate) struct RawQuote {
    #[serde(rename = "pairId", deserialize_with = "lenient_u64")]
    pub pair_id: u64,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub link: String,
    pub pair_type: String,
    #[serde(default)]
    pub exchange: String,
}

// The endpoint serves pair ids as numbers on some pages and as strings on
// others.
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

/// Convert one page of raw quotes into hits, applying the caller's filters.
pub(crate) fn collect_hits(
    raw_quotes: Vec<RawQuote>,
    countries: Option<&[String]>,
    kinds: Option<&[ProductKind]>,
) -> Vec<QuoteHit> {
    raw_quotes
        .into_iter()
        .filter_map(hit_from_raw)
        .filter(|hit| passes_filters(hit, countries, kinds))
        .collect()
}

/// Hits whose pair type has no catalog counterpart (FX futures, for one)
/// are dropped rather than misclassified.
fn hit_from_raw(raw: RawQuote) -> Option<QuoteHit> {
    let Some(kind) = kind_from_pair_type(&raw.pair_type) else {
        debug!(
            "dropping search hit `{}` with unmapped pair type `{}`",
            raw.name, raw.pair_type
        );
        return None;
    };
    Some(QuoteHit {
        pair_id: raw.pair_id,
        name: raw.name,
        symbol: raw.symbol,
        country: country_from_flag(&raw.flag),
        kind,
        exchange: raw.exchange,
        tag: tag_from_link(&raw.link),
    })
}

fn passes_filters(
    hit: &QuoteHit,
    countries: Option<&[String]>,
    kinds: Option<&[ProductKind]>,
) -> bool {
    if let Some(kinds) = kinds {
        if !kinds.contains(&hit.kind) {
            return false;
        }
    }
    if let Some(countries) = countries {
        let Some(hit_country) = hit.country.as_deref() else {
            return false;
        };
        if !countries
            .iter()
            .any(|wanted| normalize::eq_fold(wanted, hit_country))
        {
            return false;
        }
    }
    true
}

fn kind_from_pair_type(token: &str) -> Option<ProductKind> {
    match token {
        "equities" => Some(ProductKind::Stock),
        "fund" => Some(ProductKind::Fund),
        "etf" => Some(ProductKind::Etf),
        "indice" => Some(ProductKind::Index),
        "currency" => Some(ProductKind::CurrencyCross),
        "crypto" => Some(ProductKind::Crypto),
        "bond" => Some(ProductKind::Bond),
        "commodity" => Some(ProductKind::Commodity),
        "certificate" => Some(ProductKind::Certificate),
        _ => None,
    }
}

/// Flag tokens mostly lowercase into country names directly; a handful of
/// them use site-specific spellings.
fn country_from_flag(flag: &str) -> Option<String> {
    if flag.is_empty() {
        return None;
    }
    let country = match flag {
        "UK" => "united kingdom".to_string(),
        "USA" => "united states".to_string(),
        "Cote_dIvoire" => "ivory coast".to_string(),
        "Russian_Federation" => "russia".to_string(),
        "Europe" => "euro zone".to_string(),
        _ => flag.replace('_', " ").to_lowercase(),
    };
    Some(country)
}

/// Links look like `/equities/bbva`; the slug after the section prefix is
/// the product tag.
fn tag_from_link(link: &str) -> String {
    let trimmed = link.trim_start_matches('/');
    match trimmed.split_once('/') {
        Some((_, slug)) => slug.to_string(),
        None => trimmed.to_string(),
    }
}
