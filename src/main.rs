use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use whatif::prelude::*;

#[derive(Parser)]
#[command(name = "whatif")]
#[command(about = "What-if investment KPIs from historical closing prices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //compute growth rate, current value and 5-year projection
    Kpi {
        //path to csv data file (Date,Close columns)
        #[arg(long)]
        data: Option<PathBuf>,

        //json configuration file, cli flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        //ticker symbol shown in the report
        #[arg(long)]
        symbol: Option<String>,

        //amount invested at the start
        #[arg(long)]
        investment: Option<f64>,

        //first calendar year of the investment
        #[arg(long)]
        start_year: Option<i32>,

        //print the report as json instead of a table
        #[arg(long)]
        json: bool,

        //output path for the filtered price series csv
        #[arg(long)]
        output_series_csv: Option<PathBuf>,
    },

    //print the historical prices
    Show {
        //path to csv data file
        #[arg(long)]
        data: PathBuf,

        //only show prices from this year onwards
        #[arg(long)]
        start_year: Option<i32>,
    },

    //write a default configuration file
    InitConfig {
        //output path for the json configuration
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Kpi {
            data,
            config,
            symbol,
            investment,
            start_year,
            json,
            output_series_csv,
        } => {
            let mut configuration = match config {
                Some(path) => KpiConfiguration::from_json_file(&path)
                    .context(format!("Failed to load configuration from {:?}", path))?,
                None => KpiConfiguration::default(),
            };

            if let Some(data) = data {
                configuration.data_path = data;
            }
            if let Some(symbol) = symbol {
                configuration.symbol = symbol;
            }
            if let Some(investment) = investment {
                configuration.investment = investment;
            }
            if let Some(start_year) = start_year {
                configuration.start_year = start_year;
            }

            run_kpi(&configuration, json, output_series_csv)?;
        }
        Commands::Show { data, start_year } => {
            let series = load_csv(&data)
                .context(format!("Failed to load data from {:?}", data))?;
            let series = match start_year {
                Some(year) => series.since_year(year),
                None => series,
            };

            print_series_table(&series);
        }
        Commands::InitConfig { path } => {
            KpiConfiguration::default().to_json_file(&path)?;
            println!("Configuration written to {:?}", path);
        }
    }

    Ok(())
}

fn run_kpi(
    configuration: &KpiConfiguration,
    json: bool,
    output_series_csv: Option<PathBuf>,
) -> Result<()> {
    configuration.validate()?;

    let data_path = &configuration.data_path;
    let series = load_csv(data_path).context(format!("Failed to load data from {:?}", data_path))?;

    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        info!(
            symbol = %configuration.symbol,
            from = %first.date,
            to = %last.date,
            "date range"
        );
    }

    let request = KpiRequest::new(series, configuration.investment, configuration.start_year);
    let result = request.compute();
    let report = KpiReport::new(configuration.symbol.clone(), &request, result);

    if let Some(error) = &report.result.error {
        warn!(start_year = configuration.start_year, "{}", error);
    }

    if json {
        println!("{}", report.to_json()?);
    } else {
        report.pretty_print_table();
    }

    if let Some(series_path) = output_series_csv {
        save_series_csv(&request.series.since_year(request.start_year), &series_path)?;
        println!("\nPrice series saved to {:?}", series_path);
    }

    Ok(())
}
