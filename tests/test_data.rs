use chrono::NaiveDate;
use sales_insight::data::{DailyRecord, ObservationSeries};
use sales_insight::error::InsightError;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, day).unwrap()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_series_construction_and_accessors() {
    let records = vec![
        DailyRecord::new(date(1), Some(312.0)).with_signal("temperature", 70.0),
        DailyRecord::new(date(2), Some(289.0)).with_signal("temperature", 68.0),
        DailyRecord::new(date(3), Some(265.0)),
    ];

    let series = ObservationSeries::new(names(&["temperature"]), records).unwrap();

    assert_eq!(series.len(), 3);
    assert!(!series.is_empty());
    assert_eq!(series.last_date(), Some(date(3)));
    assert_eq!(series.signal_names(), &["temperature".to_string()]);
    assert_eq!(series.sales_values(), vec![312.0, 289.0, 265.0]);
}

#[test]
fn test_paired_extraction_skips_missing_values() {
    let records = vec![
        DailyRecord::new(date(1), Some(312.0)).with_signal("temperature", 70.0),
        // Missing sales: excluded from pairing
        DailyRecord::new(date(2), None).with_signal("temperature", 68.0),
        // Missing signal: excluded from this signal's pairing only
        DailyRecord::new(date(3), Some(265.0)),
        DailyRecord::new(date(4), Some(350.0)).with_signal("temperature", 65.0),
    ];

    let series = ObservationSeries::new(names(&["temperature"]), records).unwrap();
    let pairs = series.paired("temperature").unwrap();

    assert_eq!(pairs, vec![(70.0, 312.0), (65.0, 350.0)]);
}

#[test]
fn test_series_rejects_unsorted_dates() {
    let records = vec![
        DailyRecord::new(date(2), Some(289.0)),
        DailyRecord::new(date(1), Some(312.0)),
    ];

    let result = ObservationSeries::new(names(&[]), records);
    assert!(matches!(result, Err(InsightError::DataError(_))));
}

#[test]
fn test_series_rejects_duplicate_dates() {
    let records = vec![
        DailyRecord::new(date(1), Some(312.0)),
        DailyRecord::new(date(1), Some(289.0)),
    ];

    let result = ObservationSeries::new(names(&[]), records);
    assert!(matches!(result, Err(InsightError::DataError(_))));
}

#[test]
fn test_series_rejects_negative_sales() {
    let records = vec![DailyRecord::new(date(1), Some(-5.0))];

    let result = ObservationSeries::new(names(&[]), records);
    assert!(matches!(result, Err(InsightError::DataError(_))));
}

#[test]
fn test_series_rejects_undeclared_signal() {
    let records = vec![DailyRecord::new(date(1), Some(100.0)).with_signal("reviews", 4.2)];

    let result = ObservationSeries::new(names(&["temperature"]), records);
    assert!(matches!(result, Err(InsightError::DataError(_))));
}

#[test]
fn test_series_rejects_duplicate_signal_names() {
    let result = ObservationSeries::new(names(&["temperature", "temperature"]), Vec::new());
    assert!(matches!(result, Err(InsightError::InvalidParameter(_))));
}

#[test]
fn test_trailing_average() {
    let records = vec![
        DailyRecord::new(date(1), Some(100.0)),
        DailyRecord::new(date(2), Some(200.0)),
        DailyRecord::new(date(3), None),
        DailyRecord::new(date(4), Some(300.0)),
    ];

    let series = ObservationSeries::new(names(&[]), records).unwrap();

    // Only present sales participate; the last two present values are 200, 300
    assert_eq!(series.trailing_average(2).unwrap(), 250.0);

    let result = series.trailing_average(4);
    assert!(matches!(result, Err(InsightError::InsufficientData(_))));

    let result = series.trailing_average(0);
    assert!(matches!(result, Err(InsightError::InvalidParameter(_))));
}

#[test]
fn test_from_csv_with_absent_cells() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,sales,temperature,foot_traffic").unwrap();
    writeln!(file, "2023-06-01,312.0,70.0,80.0").unwrap();
    writeln!(file, "2023-06-02,,68.0,75.0").unwrap();
    writeln!(file, "2023-06-03,265.0,,60.0").unwrap();

    let series = ObservationSeries::from_csv(file.path()).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.signal_names(), &["temperature", "foot_traffic"]);

    // Empty cells are absent, never zero
    assert_eq!(series.records()[1].sales, None);
    assert_eq!(series.records()[2].signal("temperature"), None);
    assert_eq!(series.paired("temperature").unwrap(), vec![(70.0, 312.0)]);
}

#[test]
fn test_from_csv_error_handling() {
    let result = ObservationSeries::from_csv("nonexistent_file.csv");
    assert!(result.is_err());

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "day,amount").unwrap();
    writeln!(file, "2023-06-01,312.0").unwrap();

    let result = ObservationSeries::from_csv(file.path());
    assert!(matches!(result, Err(InsightError::DataError(_))));
}

#[test]
fn test_signal_mean() {
    let records = vec![
        DailyRecord::new(date(1), Some(100.0)).with_signal("temperature", 60.0),
        DailyRecord::new(date(2), None).with_signal("temperature", 70.0),
        DailyRecord::new(date(3), Some(200.0)),
    ];

    let series = ObservationSeries::new(names(&["temperature", "reviews"]), records).unwrap();

    assert_eq!(series.signal_mean("temperature").unwrap(), 65.0);
    assert!(matches!(
        series.signal_mean("reviews"),
        Err(InsightError::InsufficientData(_))
    ));
    assert!(matches!(
        series.signal_mean("unknown"),
        Err(InsightError::InvalidParameter(_))
    ));
}
