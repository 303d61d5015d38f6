use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

//earliest start year accepted
pub const MIN_START_YEAR: i32 = 1900;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Investment must be a positive amount, got {0}")]
    InvalidInvestment(f64),
    #[error("Start year {year} outside {min}..={max}")]
    StartYearOutOfRange { year: i32, min: i32, max: i32 },
}

//complete kpi run configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiConfiguration {
    pub symbol: String,
    pub data_path: PathBuf,
    pub investment: f64,
    pub start_year: i32,
}

impl Default for KpiConfiguration {
    fn default() -> Self {
        KpiConfiguration {
            symbol: "AAPL".to_string(),
            data_path: PathBuf::from("data.csv"),
            investment: 2000.0,
            start_year: 2010,
        }
    }
}

impl KpiConfiguration {
    //checks the inputs before they reach the calculator
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.investment.is_finite() && self.investment > 0.0) {
            return Err(ConfigError::InvalidInvestment(self.investment));
        }

        let max = Utc::now().year();
        if self.start_year < MIN_START_YEAR || self.start_year > max {
            return Err(ConfigError::StartYearOutOfRange {
                year: self.start_year,
                min: MIN_START_YEAR,
                max,
            });
        }

        Ok(())
    }

    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: KpiConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
