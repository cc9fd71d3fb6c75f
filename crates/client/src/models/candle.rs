use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a price series.
///
/// Prices are kept as decimals so values survive serialization without
/// floating-point drift. Volume is absent for products the site does not
/// report turnover for, currency crosses and most indices among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Trading date of the row.
    pub date: NaiveDate,
    /// Opening price.
    pub open: Decimal,
    /// Highest traded price.
    pub high: Decimal,
    /// Lowest traded price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume, when the site reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl Candle {
    /// Create a candle without volume.
    pub fn new(date: NaiveDate, open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Self {
        Candle {
            date,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Attach traded volume.
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// A product's retrieved candle series.
///
/// Candles are always ordered oldest first, regardless of the order the
/// wire delivered them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Display name of the product the series belongs to.
    pub name: String,
    /// Currency the prices are quoted in, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Candles, oldest first.
    pub candles: Vec<Candle>,
}

impl PriceHistory {
    /// Wrap a candle series together with the product it describes.
    pub fn new(name: impl Into<String>, currency: Option<String>, candles: Vec<Candle>) -> Self {
        PriceHistory {
            name: name.into(),
            currency,
            candles,
        }
    }

    /// Number of candles in the series.
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// True when the series holds no candles.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Oldest candle, if any.
    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    /// Most recent candle, if any.
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }
}
