//! Data types returned by the retrieval client.
//!
//! - `interval`: sampling granularity for candle series
//! - `candle`: one OHLCV row and the series wrapper around it
//! - `quote_hit`: one product discovered through the live search

mod candle;
mod interval;
mod quote_hit;

pub use candle::{Candle, PriceHistory};
pub use interval::Interval;
pub use quote_hit::QuoteHit;
