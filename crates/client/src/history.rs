//! Historical-data retrieval: request forms, range chunking and HTML table
//! parsing.
//!
//! The upstream endpoint answers a form-encoded POST with an HTML fragment.
//! Every cell carries its machine-readable value in a `data-real-value`
//! attribute, with columns ordered timestamp, close, open, high, low,
//! volume. The wire always sorts newest first; parsed candles come back
//! oldest first.

use chrono::{DateTime, Months, NaiveDate};
use log::warn;
use rust_decimal::Decimal;
use scraper::{Html, Selector};

use findata_catalog::{ProductKind, ProductRecord};

use crate::errors::{ClientError, Result};
use crate::http;
use crate::models::{Candle, Interval, QuoteHit};

/// Longest span one request may cover; wider ranges are split. The
/// endpoint rejects windows that reach twenty years.
const MAX_YEARS_PER_REQUEST: u32 = 19;

/// Header string the endpoint expects for a catalog record.
///
/// Which name goes into the header depends on the product kind; sending the
/// wrong one makes the endpoint answer with an empty table.
pub(crate) fn header_for(record: &ProductRecord) -> String {
    let symbol = record.symbol.as_deref().unwrap_or(&record.name);
    let full_name = record.full_name.as_deref().unwrap_or(&record.name);
    match record.kind {
        ProductKind::Stock | ProductKind::Fund | ProductKind::Etf | ProductKind::Certificate => {
            format!("{symbol} Historical Data")
        }
        ProductKind::Index | ProductKind::Commodity => format!("{full_name} Historical Data"),
        ProductKind::CurrencyCross | ProductKind::Crypto => {
            format!("{} Historical Data", record.name)
        }
        ProductKind::Bond => format!("{full_name} Bond Yield Historical Data"),
    }
}

/// Header string for a live-search hit, which carries no full name.
pub(crate) fn header_for_hit(hit: &QuoteHit) -> String {
    match hit.kind {
        ProductKind::Stock | ProductKind::Fund | ProductKind::Etf | ProductKind::Certificate => {
            format!("{} Historical Data", hit.symbol)
        }
        ProductKind::Bond => format!("{} Bond Yield Historical Data", hit.name),
        _ => format!("{} Historical Data", hit.name),
    }
}

/// Form for the most recent window, bounded by the site rather than dates.
pub(crate) fn recent_form(
    pair_id: u64,
    header: &str,
    interval: Interval,
) -> Vec<(&'static str, String)> {
    vec![
        ("curr_id", pair_id.to_string()),
        ("smlID", http::random_sml_id().to_string()),
        ("header", header.to_string()),
        ("interval_sec", interval.as_str().to_string()),
        ("sort_col", "date".to_string()),
        ("sort_ord", "DESC".to_string()),
        ("action", "historical_data".to_string()),
    ]
}

/// Form for an explicit date window. Dates go over the wire month first,
/// regardless of how the caller's locale writes them.
pub(crate) fn historical_form(
    pair_id: u64,
    header: &str,
    from: NaiveDate,
    to: NaiveDate,
    interval: Interval,
) -> Vec<(&'static str, String)> {
    vec![
        ("curr_id", pair_id.to_string()),
        ("smlID", http::random_sml_id().to_string()),
        ("header", header.to_string()),
        ("st_date", from.format("%m/%d/%Y").to_string()),
        ("end_date", to.format("%m/%d/%Y").to_string()),
        ("interval_sec", interval.as_str().to_string()),
        ("sort_col", "date".to_string()),
        ("sort_ord", "DESC".to_string()),
        ("action", "historical_data".to_string()),
    ]
}

/// Split an inclusive date range into windows the endpoint will serve.
///
/// Windows never overlap, so concatenating their candles yields each date
/// exactly once.
pub(crate) fn chunk_ranges(from: NaiveDate, to: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::new();
    let mut cursor = from;
    loop {
        let cap = cursor
            .checked_add_months(Months::new(12 * MAX_YEARS_PER_REQUEST))
            .unwrap_or(to);
        if cap >= to {
            windows.push((cursor, to));
            return windows;
        }
        windows.push((cursor, cap));
        cursor = cap.succ_opt().unwrap_or(to);
    }
}

/// Parse the HTML fragment the historical endpoint answers with.
///
/// Rows the parser cannot understand (advertisement rows, rows with missing
/// attributes) are logged and skipped; a wholly unparsable table is a scrape
/// error, and an explicit "No results found" marker maps to [`ClientError::NoData`].
pub(crate) fn parse_history_html(html: &str, name: &str) -> Result<Vec<Candle>> {
    let document = Html::parse_document(html);
    if document.select(&selector("table#curr_table")?).next().is_none() {
        return Err(ClientError::Scrape {
            reason: "historical table missing from response".to_string(),
        });
    }

    let rows = selector("table#curr_table > tbody > tr")?;
    let cells = selector("td")?;
    let mut candles = Vec::new();
    for row in document.select(&rows) {
        let text: String = row.text().collect();
        if text.contains("No results found") {
            return Err(ClientError::NoData {
                name: name.to_string(),
            });
        }
        let values: Vec<&str> = row
            .select(&cells)
            .filter_map(|cell| cell.value().attr("data-real-value"))
            .collect();
        match parse_row(&values) {
            Ok(candle) => candles.push(candle),
            Err(reason) => warn!("skipping unparsable row for `{name}`: {reason}"),
        }
    }
    if candles.is_empty() {
        return Err(ClientError::Scrape {
            reason: "historical table held no parsable rows".to_string(),
        });
    }
    candles.sort_by_key(|candle| candle.date);
    Ok(candles)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| ClientError::Scrape {
        reason: format!("bad selector `{css}`: {err}"),
    })
}

fn parse_row(values: &[&str]) -> std::result::Result<Candle, String> {
    if values.len() < 5 {
        return Err(format!(
            "expected at least 5 real values, found {}",
            values.len()
        ));
    }
    let seconds: i64 = values[0]
        .parse()
        .map_err(|_| format!("bad timestamp `{}`", values[0]))?;
    let date = DateTime::from_timestamp(seconds, 0)
        .map(|moment| moment.date_naive())
        .ok_or_else(|| format!("timestamp `{seconds}` out of range"))?;
    let close = parse_decimal(values[1])?;
    let open = parse_decimal(values[2])?;
    let high = parse_decimal(values[3])?;
    let low = parse_decimal(values[4])?;
    let candle = Candle::new(date, open, high, low, close);
    Ok(match values.get(5).and_then(|raw| parse_volume(raw)) {
        Some(volume) => candle.with_volume(volume),
        None => candle,
    })
}

fn parse_decimal(raw: &str) -> std::result::Result<Decimal, String> {
    raw.replace(',', "")
        .parse()
        .map_err(|_| format!("bad price `{raw}`"))
}

/// Volumes arrive either as plain integers or abbreviated with a K, M or B
/// suffix; a dash marks products without reported turnover.
fn parse_volume(raw: &str) -> Option<u64> {
    let cleaned = raw.replace(',', "");
    let (digits, multiplier) = match cleaned.chars().last()? {
        'K' => (&cleaned[..cleaned.len() - 1], 1_000.0),
        'M' => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        'B' => (&cleaned[..cleaned.len() - 1], 1_000_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };
    let value: f64 = digits.parse().ok()?;
    if value < 0.0 {
        return None;
    }
    Some((value * multiplier) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // Two trading days in wire order (newest first) plus an advertisement
    // row the parser has to step over.
    const SAMPLE_TABLE: &str = r#"
        <table id="curr_table">
          <thead>
            <tr><th>Date</th><th>Price</th><th>Open</th><th>High</th><th>Low</th><th>Vol.</th></tr>
          </thead>
          <tbody>
            <tr>
              <td data-real-value="1565913600">Aug 16, 2019</td>
              <td data-real-value="4.365">4.365</td>
              <td data-real-value="4.234">4.234</td>
              <td data-real-value="4.375">4.375</td>
              <td data-real-value="4.208">4.208</td>
              <td data-real-value="46.08M">46.08M</td>
            </tr>
            <tr>
              <td colspan="6">Advertisement</td>
            </tr>
            <tr>
              <td data-real-value="1565827200">Aug 15, 2019</td>
              <td data-real-value="4.234">4.234</td>
              <td data-real-value="4.281">4.281</td>
              <td data-real-value="4.298">4.298</td>
              <td data-real-value="4.187">4.187</td>
              <td data-real-value="21,340,000">21.34M</td>
            </tr>
          </tbody>
        </table>
    "#;

    const EMPTY_TABLE: &str = r#"
        <table id="curr_table">
          <tbody>
            <tr><td colspan="6">No results found</td></tr>
          </tbody>
        </table>
    "#;

    fn stock(symbol: &str) -> ProductRecord {
        ProductRecord::new(ProductKind::Stock, symbol, symbol.to_lowercase(), 421)
            .with_symbol(symbol)
            .with_full_name(format!("{symbol} Full Name"))
    }

    // ==================== Header strings ====================

    #[test]
    fn test_header_uses_symbol_for_listed_products() {
        assert_eq!(header_for(&stock("BBVA")), "BBVA Historical Data");
        let fund = ProductRecord::new(
            ProductKind::Fund,
            "BBVA Quality Inversión Conservadora FI",
            "bbva-quality",
            1_000_001,
        )
        .with_symbol("0P0000GNE3");
        assert_eq!(header_for(&fund), "0P0000GNE3 Historical Data");
    }

    #[test]
    fn test_header_uses_full_name_for_indices_and_commodities() {
        let index = ProductRecord::new(ProductKind::Index, "IBEX 35", "spain-35", 175)
            .with_full_name("IBEX 35");
        assert_eq!(header_for(&index), "IBEX 35 Historical Data");

        let gold = ProductRecord::new(ProductKind::Commodity, "Gold", "gold", 8_830)
            .with_full_name("Gold Futures");
        assert_eq!(header_for(&gold), "Gold Futures Historical Data");
    }

    #[test]
    fn test_header_marks_bond_yields() {
        let bond = ProductRecord::new(ProductKind::Bond, "Spain 10Y", "spain-10-year", 23_621)
            .with_full_name("Spain 10-Year Bond Yield");
        assert_eq!(
            header_for(&bond),
            "Spain 10-Year Bond Yield Bond Yield Historical Data"
        );
    }

    #[test]
    fn test_header_for_hit_follows_kind() {
        let hit = QuoteHit {
            pair_id: 421,
            name: "Banco Bilbao Vizcaya Argentaria".to_string(),
            symbol: "BBVA".to_string(),
            country: Some("spain".to_string()),
            kind: ProductKind::Stock,
            exchange: "Madrid".to_string(),
            tag: "bbva".to_string(),
        };
        assert_eq!(header_for_hit(&hit), "BBVA Historical Data");

        let bond_hit = QuoteHit {
            kind: ProductKind::Bond,
            name: "Spain 10-Year".to_string(),
            ..hit
        };
        assert_eq!(
            header_for_hit(&bond_hit),
            "Spain 10-Year Bond Yield Historical Data"
        );
    }

    // ==================== Request forms ====================

    #[test]
    fn test_historical_form_carries_month_first_dates() {
        let from = NaiveDate::from_ymd_opt(2019, 8, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2019, 8, 16).unwrap();
        let form = historical_form(421, "BBVA Historical Data", from, to, Interval::Daily);
        let lookup = |key: &str| {
            form.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.as_str())
        };
        assert_eq!(lookup("curr_id"), Some("421"));
        assert_eq!(lookup("st_date"), Some("08/01/2019"));
        assert_eq!(lookup("end_date"), Some("08/16/2019"));
        assert_eq!(lookup("interval_sec"), Some("Daily"));
        assert_eq!(lookup("action"), Some("historical_data"));
        assert!(lookup("smlID").is_some());
    }

    #[test]
    fn test_wire_dates_disambiguate_day_and_month() {
        // 2nd of October vs 10th of February only differ by field order;
        // the endpoint reads month first.
        let from = NaiveDate::from_ymd_opt(2019, 10, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2019, 10, 21).unwrap();
        let form = historical_form(421, "BBVA Historical Data", from, to, Interval::Daily);
        let st_date = form
            .iter()
            .find(|(name, _)| *name == "st_date")
            .map(|(_, value)| value.as_str());
        let end_date = form
            .iter()
            .find(|(name, _)| *name == "end_date")
            .map(|(_, value)| value.as_str());
        assert_eq!(st_date, Some("10/02/2019"));
        assert_eq!(end_date, Some("10/21/2019"));
    }

    #[test]
    fn test_recent_form_has_no_date_bounds() {
        let form = recent_form(175, "IBEX 35 Historical Data", Interval::Weekly);
        assert!(form.iter().all(|(name, _)| *name != "st_date"));
        assert!(form.iter().all(|(name, _)| *name != "end_date"));
        assert_eq!(
            form.iter().find(|(name, _)| *name == "interval_sec"),
            Some(&("interval_sec", "Weekly".to_string()))
        );
    }

    // ==================== Range chunking ====================

    #[test]
    fn test_short_range_stays_in_one_window() {
        let from = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        assert_eq!(chunk_ranges(from, to), vec![(from, to)]);
    }

    #[test]
    fn test_long_range_splits_into_disjoint_windows() {
        let from = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let windows = chunk_ranges(from, to);
        assert_eq!(
            windows,
            vec![
                (from, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()),
                (
                    NaiveDate::from_ymd_opt(1999, 1, 2).unwrap(),
                    NaiveDate::from_ymd_opt(2018, 1, 2).unwrap()
                ),
                (NaiveDate::from_ymd_opt(2018, 1, 3).unwrap(), to),
            ]
        );
        for pair in windows.windows(2) {
            assert!(pair[0].1 < pair[1].0, "windows must not overlap");
        }
    }

    #[test]
    fn test_windows_never_reach_twenty_years() {
        let from = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

        // Nineteen years fit in a single request.
        let to = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert_eq!(chunk_ranges(from, to), vec![(from, to)]);

        // Exactly twenty years must go out as two.
        let to = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(
            chunk_ranges(from, to),
            vec![
                (from, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()),
                (NaiveDate::from_ymd_opt(2019, 1, 2).unwrap(), to),
            ]
        );
    }

    #[test]
    fn test_single_day_range_survives_chunking() {
        let day = NaiveDate::from_ymd_opt(2019, 8, 16).unwrap();
        assert_eq!(chunk_ranges(day, day), vec![(day, day)]);
    }

    // ==================== Volume parsing ====================

    #[test]
    fn test_volume_suffixes_expand() {
        assert_eq!(parse_volume("21.34K"), Some(21_340));
        assert_eq!(parse_volume("46.08M"), Some(46_080_000));
        assert_eq!(parse_volume("2B"), Some(2_000_000_000));
    }

    #[test]
    fn test_plain_and_grouped_volumes_parse() {
        assert_eq!(parse_volume("46080000"), Some(46_080_000));
        assert_eq!(parse_volume("21,340,000"), Some(21_340_000));
    }

    #[test]
    fn test_dash_and_garbage_volumes_are_absent() {
        assert_eq!(parse_volume("-"), None);
        assert_eq!(parse_volume(""), None);
        assert_eq!(parse_volume("n/a"), None);
    }

    // ==================== Table parsing ====================

    #[test]
    fn test_table_parses_oldest_first() {
        let candles = parse_history_html(SAMPLE_TABLE, "BBVA").unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(
            candles[0].date,
            NaiveDate::from_ymd_opt(2019, 8, 15).unwrap()
        );
        assert_eq!(
            candles[1].date,
            NaiveDate::from_ymd_opt(2019, 8, 16).unwrap()
        );
        assert!(candles[0].date < candles[1].date);
    }

    #[test]
    fn test_table_cells_map_to_ohlcv() {
        let candles = parse_history_html(SAMPLE_TABLE, "BBVA").unwrap();
        let newest = candles.last().unwrap();
        assert_eq!(newest.open, dec!(4.234));
        assert_eq!(newest.high, dec!(4.375));
        assert_eq!(newest.low, dec!(4.208));
        assert_eq!(newest.close, dec!(4.365));
        assert_eq!(newest.volume, Some(46_080_000));
        assert_eq!(candles[0].volume, Some(21_340_000));
    }

    #[test]
    fn test_no_results_marker_maps_to_no_data() {
        let err = parse_history_html(EMPTY_TABLE, "BBVA").unwrap_err();
        assert!(matches!(err, ClientError::NoData { name } if name == "BBVA"));
    }

    #[test]
    fn test_missing_table_is_a_scrape_error() {
        let err = parse_history_html("<div>down for maintenance</div>", "BBVA").unwrap_err();
        assert!(matches!(err, ClientError::Scrape { .. }));
    }

    #[test]
    fn test_table_of_only_junk_rows_is_a_scrape_error() {
        let html = r#"
            <table id="curr_table">
              <tbody>
                <tr><td colspan="6">Advertisement</td></tr>
                <tr><td data-real-value="oops">?</td></tr>
              </tbody>
            </table>
        "#;
        let err = parse_history_html(html, "BBVA").unwrap_err();
        assert!(matches!(err, ClientError::Scrape { .. }));
    }
}
