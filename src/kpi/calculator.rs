use crate::data::PriceSeries;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//average days per year, leap years included
pub const DAYS_PER_YEAR: f64 = 365.25;

//horizon of the future value projection
pub const PROJECTION_YEARS: i32 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KpiError {
    #[error("No data available from {start_year}.")]
    NoDataInRange { start_year: i32 },
}

//inputs of a single kpi computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiRequest {
    pub series: PriceSeries,
    pub investment: f64,
    pub start_year: i32,
}

impl KpiRequest {
    pub fn new(series: PriceSeries, investment: f64, start_year: i32) -> Self {
        KpiRequest {
            series,
            investment,
            start_year,
        }
    }

    pub fn compute(&self) -> KpiResult {
        compute_kpis(&self.series, self.investment, self.start_year)
    }
}

//kpis rounded to 2 decimals, or the error message when no data matched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KpiResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_rate_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KpiResult {
    pub fn from_error(error: &KpiError) -> Self {
        KpiResult {
            error: Some(error.to_string()),
            ..KpiResult::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    //false when a present value overflowed to inf
    pub fn is_finite(&self) -> bool {
        [self.growth_rate_pct, self.current_value, self.future_value]
            .into_iter()
            .flatten()
            .all(f64::is_finite)
    }
}

//computes cagr, current value and 5-year projection from start_year onwards
pub fn compute_kpis(series: &PriceSeries, investment: f64, start_year: i32) -> KpiResult {
    match try_compute_kpis(series, investment, start_year) {
        Ok(result) => result,
        Err(error) => KpiResult::from_error(&error),
    }
}

fn try_compute_kpis(
    series: &PriceSeries,
    investment: f64,
    start_year: i32,
) -> Result<KpiResult, KpiError> {
    let filtered = series.since_year(start_year);

    let (first, last) = match (filtered.first(), filtered.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(KpiError::NoDataInRange { start_year }),
    };

    let start_price = first.close;
    let current_price = last.close;
    let ratio = current_price / start_price;

    let elapsed_days = (last.date - first.date).num_days() as f64;
    let elapsed_years = elapsed_days / DAYS_PER_YEAR;

    let growth_rate_pct = if elapsed_years > 0.0 {
        Some((ratio.powf(1.0 / elapsed_years) - 1.0) * 100.0)
    } else {
        None
    };

    let current_value = investment * ratio;

    let future_value =
        growth_rate_pct.map(|rate| current_value * (1.0 + rate / 100.0).powi(PROJECTION_YEARS));

    Ok(KpiResult {
        growth_rate_pct: growth_rate_pct.map(round2),
        current_value: Some(round2(current_value)),
        future_value: future_value.map(round2),
        error: None,
    })
}

//rounds to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
