pub mod calculator;
pub mod report;

pub use calculator::{compute_kpis, KpiError, KpiRequest, KpiResult, PROJECTION_YEARS};
pub use report::{print_series_table, save_series_csv, KpiReport, OVERFLOW_MESSAGE};
