use sales_insight::error::{InsightError, Result};
use std::io;

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let insight_error = InsightError::from(io_error);

    assert!(matches!(insight_error, InsightError::IoError(_)));

    let error_string = format!("{}", insight_error);
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("file not found"));
}

#[test]
fn test_error_display() {
    let error = InsightError::InsufficientData(
        "Signal 'temperature' has 1 paired observations, need at least 2".to_string(),
    );
    let error_string = format!("{}", error);

    assert!(error_string.contains("Insufficient data"));
    assert!(error_string.contains("temperature"));

    let error = InsightError::UndefinedChange("previous value is zero".to_string());
    assert!(format!("{}", error).contains("Undefined change"));
}

#[test]
fn test_error_variants_are_distinct() {
    let insufficient = InsightError::InsufficientData("too few observations".to_string());
    let degenerate = InsightError::DegenerateBaseline("zero baseline".to_string());
    let sequence = InsightError::InvalidSequence("dates out of order".to_string());
    let change = InsightError::UndefinedChange("zero previous".to_string());

    assert!(matches!(insufficient, InsightError::InsufficientData(_)));
    assert!(matches!(degenerate, InsightError::DegenerateBaseline(_)));
    assert!(matches!(sequence, InsightError::InvalidSequence(_)));
    assert!(matches!(change, InsightError::UndefinedChange(_)));
}

#[test]
fn test_result_mapping() {
    let result: std::result::Result<(), &str> = Err("test error");
    let mapped: Result<()> = result.map_err(|e| InsightError::DataError(e.to_string()));

    assert!(mapped.is_err());
    if let Err(InsightError::DataError(msg)) = mapped {
        assert_eq!(msg, "test error");
    } else {
        panic!("Wrong error variant");
    }
}
