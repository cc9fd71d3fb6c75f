//! Bundled reference datasets.
//!
//! Each product kind ships as a CSV file compiled into the crate via
//! `include_str!`; the whole set is parsed once behind `lazy_static` and
//! handed out as a shared `Arc<Catalog>`. All files use one row schema,
//! with empty cells for fields a kind does not carry.

use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::errors::{CatalogError, Result};
use crate::models::{ProductKind, ProductRecord};

const STOCKS_CSV: &str = include_str!("stocks.csv");
const FUNDS_CSV: &str = include_str!("funds.csv");
const ETFS_CSV: &str = include_str!("etfs.csv");
const INDICES_CSV: &str = include_str!("indices.csv");
const CURRENCY_CROSSES_CSV: &str = include_str!("currency_crosses.csv");
const CRYPTOS_CSV: &str = include_str!("cryptos.csv");
const BONDS_CSV: &str = include_str!("bonds.csv");
const COMMODITIES_CSV: &str = include_str!("commodities.csv");
const CERTIFICATES_CSV: &str = include_str!("certificates.csv");

lazy_static! {
    static ref BUNDLED: Arc<Catalog> =
        Arc::new(load_bundled().expect("bundled datasets must be valid"));
}

/// Shared handle to the bundled catalog, loaded on first use and reused for
/// the lifetime of the process.
pub fn bundled() -> Arc<Catalog> {
    Arc::clone(&BUNDLED)
}

/// One CSV row; the same shape for every kind.
#[derive(Debug, Deserialize)]
struct Row {
    country: String,
    name: String,
    full_name: String,
    symbol: String,
    isin: String,
    currency: String,
    tag: String,
    pair_id: u64,
}

impl Row {
    fn into_record(self, kind: ProductKind) -> ProductRecord {
        let mut record = ProductRecord::new(kind, self.name, self.tag, self.pair_id);
        record.country = opt(self.country);
        record.full_name = opt(self.full_name);
        record.symbol = opt(self.symbol);
        record.isin = opt(self.isin);
        record.currency = opt(self.currency);
        record
    }
}

fn opt(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parse one kind's dataset into records, in file order.
///
/// Public so callers can build a [`Catalog`] from their own CSV files using
/// the bundled schema: `country,name,full_name,symbol,isin,currency,tag,pair_id`.
pub fn parse_dataset(kind: ProductKind, raw: &str) -> Result<Vec<ProductRecord>> {
    let mut reader = csv::ReaderBuilder::new().from_reader(raw.as_bytes());
    let mut records = Vec::new();
    for row in reader.deserialize::<Row>() {
        let row = row.map_err(|source| CatalogError::Dataset { kind, source })?;
        records.push(row.into_record(kind));
    }
    debug!("loaded {} {} records", records.len(), kind);
    Ok(records)
}

fn load_bundled() -> Result<Catalog> {
    let datasets: [(ProductKind, &str); 9] = [
        (ProductKind::Stock, STOCKS_CSV),
        (ProductKind::Fund, FUNDS_CSV),
        (ProductKind::Etf, ETFS_CSV),
        (ProductKind::Index, INDICES_CSV),
        (ProductKind::CurrencyCross, CURRENCY_CROSSES_CSV),
        (ProductKind::Crypto, CRYPTOS_CSV),
        (ProductKind::Bond, BONDS_CSV),
        (ProductKind::Commodity, COMMODITIES_CSV),
        (ProductKind::Certificate, CERTIFICATES_CSV),
    ];

    let mut builder = Catalog::builder();
    for (kind, raw) in datasets {
        builder = builder.extend(parse_dataset(kind, raw)?);
    }
    Ok(builder.build())
}
