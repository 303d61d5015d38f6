use crate::data::price::{PricePoint, PriceSeries};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

//extra columns (open, high, low, adj close, volume) are ignored
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Date", alias = "date")]
    date: String,
    #[serde(rename = "Close", alias = "close")]
    close: Option<f64>,
}

//loads a price series from a csv file with Date and Close columns
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let series = parse_csv(file)?;
    info!(path = ?path, points = series.len(), "loaded price series");

    Ok(series)
}

//parses csv content from any reader
pub fn parse_csv<R: Read>(input: R) -> Result<PriceSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut points = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let line = index + 2;
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", line))?;

        let date = parse_date(&record.date).context(format!(
            "Failed to parse date '{}' at line {}",
            record.date, line
        ))?;

        let Some(close) = record.close else {
            debug!(line, %date, "skipping row without close");
            continue;
        };

        points.push(PricePoint::new(date, close));
    }

    //sort by date to ensure chronological order
    points.sort_by(|a, b| a.date.cmp(&b.date));

    let series = PriceSeries::new(points).context("Invalid price data")?;
    Ok(series)
}

//accepts plain dates or rfc3339 timestamps, keeping the date part
fn parse_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    let timestamp = DateTime::parse_from_rfc3339(raw)?;
    Ok(timestamp.date_naive())
}
