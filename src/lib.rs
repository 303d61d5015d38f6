//what-if investment kpis from daily closing prices

pub mod config;
pub mod data;
pub mod kpi;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, KpiConfiguration};
    pub use crate::data::{load_csv, parse_csv, PriceError, PricePoint, PriceSeries};
    pub use crate::kpi::{
        compute_kpis, print_series_table, save_series_csv, KpiError, KpiReport, KpiRequest,
        KpiResult, PROJECTION_YEARS,
    };
}
