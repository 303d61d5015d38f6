use std::io::Write;
use whatif::prelude::*;

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_yahoo_style_export() {
    let file = write_csv(
        "Date,Open,High,Low,Close,Adj Close,Volume\n\
         2020-01-03,74.29,75.14,74.13,74.36,72.49,146322800\n\
         2020-01-02,74.06,75.15,73.80,75.09,73.15,135480400\n\
         2021-01-04,133.52,133.61,126.76,129.41,127.16,143301900\n",
    );

    let series = load_csv(file.path()).unwrap();

    assert_eq!(series.len(), 3);
    //rows come back sorted by date
    assert_eq!(series.first().unwrap().close, 75.09);
    assert_eq!(series.last().unwrap().close, 129.41);
}

#[test]
fn test_lowercase_headers() {
    let file = write_csv("date,close\n2020-01-02,10\n2020-01-03,11\n");
    let series = load_csv(file.path()).unwrap();
    assert_eq!(series.len(), 2);
}

#[test]
fn test_bad_date_reports_line() {
    let file = write_csv("Date,Close\n2020-01-02,10\nnot-a-date,11\n");
    let error = load_csv(file.path()).unwrap_err();
    assert!(format!("{:#}", error).contains("line 3"), "{:#}", error);
}

#[test]
fn test_duplicate_dates_rejected() {
    let file = write_csv("Date,Close\n2020-01-02,10\n2020-01-02,11\n");
    let error = load_csv(file.path()).unwrap_err();

    let price_error = error.downcast_ref::<PriceError>().unwrap();
    assert!(matches!(price_error, PriceError::DuplicateDate(_)));
}

#[test]
fn test_missing_file() {
    assert!(load_csv("/nonexistent/prices.csv").is_err());
}

#[test]
fn test_loaded_series_feeds_calculator() {
    let file = write_csv("Date,Close\n2010-01-01,100\n2015-01-01,150\n2020-01-01,200\n");
    let series = load_csv(file.path()).unwrap();

    let result = compute_kpis(&series, 1000.0, 2010);
    assert_eq!(result.current_value, Some(2000.0));
    assert_eq!(result.growth_rate_pct, Some(7.18));
}

#[test]
fn test_save_series_csv_reloads() {
    let file = write_csv("Date,Close\n2019-12-31,9.5\n2020-01-02,10\n2020-01-03,11.25\n");
    let series = load_csv(file.path()).unwrap().since_year(2020);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("series.csv");
    save_series_csv(&series, &out).unwrap();

    assert_eq!(load_csv(&out).unwrap(), series);
}
