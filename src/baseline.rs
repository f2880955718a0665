//! Baseline context: the reference sales level and historical signal means
//! that forecast deviations are measured against

use crate::data::ObservationSeries;
use crate::error::{InsightError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The "normal" the forecast deviates from: a baseline sales level, the
/// date it refers to, and the historical mean of each signal in stable
/// signal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineContext {
    baseline_sales: f64,
    reference_date: NaiveDate,
    signal_means: Vec<(String, f64)>,
}

impl BaselineContext {
    /// Create a baseline from caller-supplied values.
    ///
    /// The baseline sales level must be finite and positive; relative
    /// deviations from a zero baseline are meaningless.
    pub fn new(
        baseline_sales: f64,
        reference_date: NaiveDate,
        signal_means: Vec<(String, f64)>,
    ) -> Result<Self> {
        if !baseline_sales.is_finite() || baseline_sales <= 0.0 {
            return Err(InsightError::DegenerateBaseline(format!(
                "Baseline sales level must be finite and positive, got {}",
                baseline_sales
            )));
        }

        for (name, mean) in &signal_means {
            if !mean.is_finite() {
                return Err(InsightError::DataError(format!(
                    "Historical mean for signal '{}' is not finite",
                    name
                )));
            }
        }

        Ok(Self {
            baseline_sales,
            reference_date,
            signal_means,
        })
    }

    /// Derive a baseline from a series: the trailing average of the last
    /// `window` present sales values, referenced to the series' last date,
    /// with per-signal historical means over all present values.
    ///
    /// Signals with no observed values are left out of the means; the
    /// forecast then excludes them.
    pub fn from_series(series: &ObservationSeries, window: usize) -> Result<Self> {
        let baseline_sales = series.trailing_average(window)?;
        let reference_date = series.last_date().ok_or_else(|| {
            InsightError::DataError("Cannot derive a baseline from an empty series".to_string())
        })?;

        let mut signal_means = Vec::new();
        for name in series.signal_names() {
            match series.signal_mean(name) {
                Ok(mean) => signal_means.push((name.clone(), mean)),
                Err(InsightError::InsufficientData(_)) => {
                    debug!(signal = %name, "no observed values; leaving signal out of baseline");
                }
                Err(other) => return Err(other),
            }
        }

        Self::new(baseline_sales, reference_date, signal_means)
    }

    /// The baseline sales level
    pub fn baseline_sales(&self) -> f64 {
        self.baseline_sales
    }

    /// The date the baseline refers to; forecasts must start after it
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Historical signal means in stable signal order
    pub fn signal_means(&self) -> &[(String, f64)] {
        &self.signal_means
    }

    /// Historical mean for one signal, if known
    pub fn signal_mean(&self, signal: &str) -> Option<f64> {
        self.signal_means
            .iter()
            .find(|(name, _)| name == signal)
            .map(|(_, mean)| *mean)
    }
}
