pub mod kpi_config;

pub use kpi_config::{ConfigError, KpiConfiguration, MIN_START_YEAR};
