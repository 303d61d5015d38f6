use crate::data::PriceSeries;
use crate::kpi::calculator::{KpiRequest, KpiResult, PROJECTION_YEARS};
use anyhow::Result;
use chrono::NaiveDate;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OVERFLOW_MESSAGE: &str =
    "Growth over this period is too steep to project, values exceed the numeric range.";

//kpi result together with the inputs that produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiReport {
    pub symbol: String,
    pub investment: f64,
    pub start_year: i32,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub result: KpiResult,
}

impl KpiReport {
    //results with non-finite values are reported as an error
    pub fn new(symbol: impl Into<String>, request: &KpiRequest, result: KpiResult) -> Self {
        let window = request.series.since_year(request.start_year);

        let result = if result.is_finite() {
            result
        } else {
            KpiResult {
                error: Some(OVERFLOW_MESSAGE.to_string()),
                ..KpiResult::default()
            }
        };

        KpiReport {
            symbol: symbol.into(),
            investment: request.investment,
            start_year: request.start_year,
            first_date: window.first().map(|p| p.date),
            last_date: window.last().map(|p| p.date),
            result,
        }
    }

    //table rows as (label, value), the error message replaces the numbers
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("Symbol".to_string(), self.symbol.clone()),
            ("Investment".to_string(), format!("{:.2}", self.investment)),
            ("Start Year".to_string(), self.start_year.to_string()),
        ];

        if let Some(error) = &self.result.error {
            rows.push(("Error".to_string(), error.clone()));
            return rows;
        }

        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            rows.push(("Period".to_string(), format!("{} to {}", first, last)));
        }

        rows.push((
            "Growth Rate (CAGR)".to_string(),
            format_value(self.result.growth_rate_pct, "%"),
        ));
        rows.push((
            "Current Value".to_string(),
            format_value(self.result.current_value, ""),
        ));
        rows.push((
            format!("Future Value ({}y)", PROJECTION_YEARS),
            format_value(self.result.future_value, ""),
        ));

        rows
    }

    //prints the report in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        for (label, value) in self.rows() {
            table.add_row(Row::new(vec![Cell::new(&label), Cell::new(&value)]));
        }

        table.printstd();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn format_value(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, suffix),
        None => "n/a".to_string(),
    }
}

//prints the price series as a date/close table
pub fn print_series_table(series: &PriceSeries) {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Date"), Cell::new("Close")]));

    for point in series {
        table.add_row(Row::new(vec![
            Cell::new(&point.date.to_string()),
            Cell::new(&format!("{:.2}", point.close)),
        ]));
    }

    table.printstd();
}

//writes the series as date,close csv for external charting
pub fn save_series_csv<P: AsRef<Path>>(series: &PriceSeries, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "close"])?;

    for point in series {
        writer.write_record([point.date.to_string(), point.close.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PricePoint;
    use crate::kpi::calculator::compute_kpis;

    fn request(start_year: i32) -> KpiRequest {
        let points = vec![
            PricePoint::new(NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(), 50.0),
        ];
        KpiRequest::new(PriceSeries::new(points).unwrap(), 500.0, start_year)
    }

    #[test]
    fn test_rows_show_na_for_absent_values() {
        let req = request(2015);
        let report = KpiReport::new("AAPL", &req, req.compute());
        let rows = report.rows();

        let growth = rows.iter().find(|(l, _)| l == "Growth Rate (CAGR)").unwrap();
        assert_eq!(growth.1, "n/a");

        let current = rows.iter().find(|(l, _)| l == "Current Value").unwrap();
        assert_eq!(current.1, "500.00");

        assert!(rows.iter().any(|(l, v)| l == "Period" && v == "2015-06-01 to 2015-06-01"));
    }

    #[test]
    fn test_rows_show_error_instead_of_metrics() {
        let req = request(2020);
        let report = KpiReport::new("AAPL", &req, compute_kpis(&req.series, 500.0, 2020));
        let rows = report.rows();

        assert!(rows.iter().any(|(l, _)| l == "Error"));
        assert!(!rows.iter().any(|(l, _)| l == "Current Value"));
        assert_eq!(report.first_date, None);
    }

    #[test]
    fn test_json_contains_result() {
        let req = request(2015);
        let report = KpiReport::new("AAPL", &req, req.compute());
        let json = report.to_json().unwrap();

        let parsed: KpiReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_overflowed_projection_becomes_error() {
        let points = vec![
            PricePoint::new(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), 100.0),
            PricePoint::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 1000.0),
        ];
        let req = KpiRequest::new(PriceSeries::new(points).unwrap(), 1000.0, 2026);
        let report = KpiReport::new("AAPL", &req, req.compute());

        assert_eq!(report.result.error.as_deref(), Some(OVERFLOW_MESSAGE));
        assert_eq!(report.result.growth_rate_pct, None);
        assert_eq!(report.result.current_value, None);
        assert_eq!(report.result.future_value, None);

        let rows = report.rows();
        assert!(rows.iter().any(|(l, v)| l == "Error" && v == OVERFLOW_MESSAGE));
        assert!(!rows.iter().any(|(_, v)| v.contains("inf")));

        let json = report.to_json().unwrap();
        assert!(!json.contains("null"));
        let parsed: KpiReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
