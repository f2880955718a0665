//! Daily observation series handling for correlation and forecasting

use crate::error::{InsightError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashMap;
use std::path::Path;

/// A single day of sales together with any contextual signals observed
/// on that day. Missing values stay absent; they are never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Total sales for the day, if recorded
    pub sales: Option<f64>,
    /// Named contextual signal values observed on this day
    pub signals: HashMap<String, f64>,
}

impl DailyRecord {
    /// Create a record with no signal values attached
    pub fn new(date: NaiveDate, sales: Option<f64>) -> Self {
        Self {
            date,
            sales,
            signals: HashMap::new(),
        }
    }

    /// Attach a signal value to this record
    pub fn with_signal(mut self, name: &str, value: f64) -> Self {
        self.signals.insert(name.to_string(), value);
        self
    }

    /// Get a signal value by name, if present
    pub fn signal(&self, name: &str) -> Option<f64> {
        self.signals.get(name).copied()
    }
}

/// An ordered series of daily observations plus the stable ordering of the
/// signal names it carries. The signal ordering is caller-supplied and is
/// used for every deterministic sweep and tie-break downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSeries {
    signal_names: Vec<String>,
    records: Vec<DailyRecord>,
}

impl ObservationSeries {
    /// Create a new series, validating record ordering and values.
    ///
    /// Requirements: dates strictly increasing (sorted and deduplicated by
    /// the caller), sales non-negative and finite where present, and every
    /// record signal declared in `signal_names`.
    pub fn new(signal_names: Vec<String>, records: Vec<DailyRecord>) -> Result<Self> {
        for (i, name) in signal_names.iter().enumerate() {
            if name.is_empty() {
                return Err(InsightError::InvalidParameter(
                    "Signal names must not be empty".to_string(),
                ));
            }
            if signal_names[..i].contains(name) {
                return Err(InsightError::InvalidParameter(format!(
                    "Duplicate signal name '{}'",
                    name
                )));
            }
        }

        let mut previous: Option<NaiveDate> = None;
        for record in &records {
            if let Some(prev) = previous {
                if record.date <= prev {
                    return Err(InsightError::DataError(format!(
                        "Records must be date-sorted and deduplicated: {} follows {}",
                        record.date, prev
                    )));
                }
            }
            previous = Some(record.date);

            if let Some(sales) = record.sales {
                if !sales.is_finite() || sales < 0.0 {
                    return Err(InsightError::DataError(format!(
                        "Sales on {} must be a non-negative number, got {}",
                        record.date, sales
                    )));
                }
            }

            for (name, value) in &record.signals {
                if !signal_names.contains(name) {
                    return Err(InsightError::DataError(format!(
                        "Record on {} carries undeclared signal '{}'",
                        record.date, name
                    )));
                }
                if !value.is_finite() {
                    return Err(InsightError::DataError(format!(
                        "Signal '{}' on {} is not finite",
                        name, record.date
                    )));
                }
            }
        }

        Ok(Self {
            signal_names,
            records,
        })
    }

    /// Load a series from a CSV file.
    ///
    /// The header must contain a column whose name contains "date" and one
    /// whose name contains "sales"; every other column is treated as a
    /// signal, in header order. Empty cells are recorded as absent values.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let date_idx = Self::detect_column(&headers, "date").ok_or_else(|| {
            InsightError::DataError("No date column found in data".to_string())
        })?;
        let sales_idx = Self::detect_column(&headers, "sales").ok_or_else(|| {
            InsightError::DataError("No sales column found in data".to_string())
        })?;

        let mut signal_columns = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            if idx != date_idx && idx != sales_idx {
                signal_columns.push((idx, name.to_string()));
            }
        }
        let signal_names: Vec<String> =
            signal_columns.iter().map(|(_, n)| n.clone()).collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let date_field = row.get(date_idx).unwrap_or("");
            let date: NaiveDate = date_field.parse().map_err(|_| {
                InsightError::DataError(format!("Unparseable date '{}'", date_field))
            })?;

            let sales = Self::parse_cell(row.get(sales_idx), "sales", date)?;
            let mut record = DailyRecord::new(date, sales);
            for (idx, name) in &signal_columns {
                if let Some(value) = Self::parse_cell(row.get(*idx), name, date)? {
                    record.signals.insert(name.clone(), value);
                }
            }
            records.push(record);
        }

        Self::new(signal_names, records)
    }

    /// Find the first header whose lowercase name contains `needle`
    fn detect_column(headers: &csv::StringRecord, needle: &str) -> Option<usize> {
        headers
            .iter()
            .position(|name| name.to_lowercase().contains(needle))
    }

    /// Parse a numeric cell, treating an empty cell as absent
    fn parse_cell(cell: Option<&str>, column: &str, date: NaiveDate) -> Result<Option<f64>> {
        match cell.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse::<f64>().map(Some).map_err(|_| {
                InsightError::DataError(format!(
                    "Unparseable value '{}' in column '{}' on {}",
                    text, column, date
                ))
            }),
        }
    }

    /// The stable signal ordering carried by this series
    pub fn signal_names(&self) -> &[String] {
        &self.signal_names
    }

    /// The underlying daily records
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Number of daily records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the series has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Date of the most recent record, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Extract `(signal, sales)` pairs for records where both are present,
    /// in record order
    pub fn paired(&self, signal: &str) -> Result<Vec<(f64, f64)>> {
        if !self.signal_names.iter().any(|n| n == signal) {
            return Err(InsightError::InvalidParameter(format!(
                "Unknown signal '{}'",
                signal
            )));
        }

        Ok(self
            .records
            .iter()
            .filter_map(|record| match (record.signal(signal), record.sales) {
                (Some(x), Some(y)) => Some((x, y)),
                _ => None,
            })
            .collect())
    }

    /// All present sales values, in record order
    pub fn sales_values(&self) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.sales).collect()
    }

    /// All present values of a signal, in record order
    pub fn signal_values(&self, signal: &str) -> Result<Vec<f64>> {
        if !self.signal_names.iter().any(|n| n == signal) {
            return Err(InsightError::InvalidParameter(format!(
                "Unknown signal '{}'",
                signal
            )));
        }

        Ok(self
            .records
            .iter()
            .filter_map(|r| r.signal(signal))
            .collect())
    }

    /// Historical mean of a signal over its present values
    pub fn signal_mean(&self, signal: &str) -> Result<f64> {
        let values = self.signal_values(signal)?;
        if values.is_empty() {
            return Err(InsightError::InsufficientData(format!(
                "No observed values for signal '{}'",
                signal
            )));
        }
        Ok(values.iter().mean())
    }

    /// Trailing average of the last `window` present sales values
    pub fn trailing_average(&self, window: usize) -> Result<f64> {
        if window == 0 {
            return Err(InsightError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        let sales = self.sales_values();
        if sales.len() < window {
            return Err(InsightError::InsufficientData(format!(
                "Trailing average needs at least {} sales observations, have {}",
                window,
                sales.len()
            )));
        }

        Ok(sales[sales.len() - window..].iter().mean())
    }
}
