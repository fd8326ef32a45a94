// File: crates/trend-core/src/loader.rs
// Summary: Decodes CSV text into a Series, coercing the date and value columns.
// Notes:
// - Header lookup is case-insensitive and trims whitespace; other columns are dropped.
// - A row that fails to coerce is skipped and counted; a missing column fails the whole resource.

use std::io::Read;

use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::series::{Date, Point, Series};

/// Names of the two columns projected out of each row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Columns {
    pub date: String,
    pub value: String,
}

impl Columns {
    pub fn new(date: &str, value: &str) -> Self {
        Self { date: date.trim().to_lowercase(), value: value.trim().to_lowercase() }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::new("year", "value")
    }
}

/// Decoded series plus how many rows were dropped on the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed {
    pub series: Series,
    pub skipped: usize,
}

pub fn parse_series(text: &str, columns: &Columns) -> ChartResult<Parsed> {
    if text.trim().is_empty() {
        debug!("empty CSV body");
        return Ok(Parsed { series: Series::default(), skipped: 0 });
    }
    parse_reader(text.as_bytes(), columns)
}

pub fn parse_reader<R: Read>(reader: R, columns: &Columns) -> ChartResult<Parsed> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
        .collect::<Vec<_>>();
    debug!(?headers, "CSV headers");

    let idx = |want: &str| headers.iter().position(|h| h == want);
    let (Some(i_date), Some(i_value)) = (idx(&columns.date), idx(&columns.value)) else {
        return Err(ChartError::Parse(format!(
            "expected columns `{}` and `{}`, found {:?}",
            columns.date, columns.value, headers
        )));
    };

    let mut series = Series::default();
    let mut skipped = 0usize;
    for (row, rec) in rdr.records().enumerate() {
        let line = row + 2; // 1-based, after the header
        let rec = match rec {
            Ok(rec) => rec,
            Err(err) => {
                warn!(line, %err, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };
        let date = rec.get(i_date).and_then(Date::parse);
        let value = rec
            .get(i_value)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite());
        match (date, value) {
            (Some(date), Some(value)) => series.push(Point { date, value }),
            _ => {
                warn!(line, record = ?rec, "skipping row with unparseable date or value");
                skipped += 1;
            }
        }
    }
    debug!(points = series.len(), skipped, "decoded series");
    Ok(Parsed { series, skipped })
}
