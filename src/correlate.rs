//! Pairwise correlation and single-variable linear regression between
//! contextual signals and sales

use crate::data::ObservationSeries;
use crate::error::{InsightError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::debug;

/// Ordinary least-squares fit of sales against a single signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Change in sales per unit of the signal
    pub slope: f64,
    /// Predicted sales when the signal is zero
    pub intercept: f64,
    /// Coefficient of determination, in [0, 1]
    pub r_squared: f64,
}

/// Pearson coefficients per signal, in the series' stable signal order.
///
/// Signals that could not be correlated (too few paired observations or
/// zero variance) are omitted from the coefficients and listed in
/// `skipped`, so consumers can surface "data not available" instead of a
/// fabricated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CorrelationSet {
    coefficients: Vec<(String, f64)>,
    skipped: Vec<String>,
}

impl CorrelationSet {
    /// Build a set from already-computed coefficients
    pub fn new(coefficients: Vec<(String, f64)>) -> Self {
        Self {
            coefficients,
            skipped: Vec::new(),
        }
    }

    /// Coefficient for a signal, if one was computed
    pub fn get(&self, signal: &str) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|(name, _)| name == signal)
            .map(|(_, c)| *c)
    }

    /// The `(signal, coefficient)` pairs in stable signal order
    pub fn coefficients(&self) -> &[(String, f64)] {
        &self.coefficients
    }

    /// Signals skipped for insufficient data
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Number of computed coefficients
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Check whether no coefficients were computed
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

/// Summary statistics over the paired `(signal, sales)` observations of
/// one signal. Accumulation is left-to-right so results are reproducible.
struct PairedStats {
    mean_x: f64,
    mean_y: f64,
    cov: f64,
    var_x: f64,
    var_y: f64,
}

fn paired_stats(series: &ObservationSeries, signal: &str) -> Result<PairedStats> {
    let pairs = series.paired(signal)?;
    if pairs.len() < 2 {
        return Err(InsightError::InsufficientData(format!(
            "Signal '{}' has {} paired observations, need at least 2",
            signal,
            pairs.len()
        )));
    }

    let xs: Vec<f64> = pairs.iter().map(|(x, _)| *x).collect();
    let ys: Vec<f64> = pairs.iter().map(|(_, y)| *y).collect();
    let mean_x = xs.iter().mean();
    let mean_y = ys.iter().mean();

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Err(InsightError::InsufficientData(format!(
            "Signal '{}' has zero variance in {}; correlation is undefined",
            signal,
            if var_x == 0.0 { "the signal series" } else { "the sales series" }
        )));
    }

    Ok(PairedStats {
        mean_x,
        mean_y,
        cov,
        var_x,
        var_y,
    })
}

/// Pearson correlation coefficient between a signal and sales, using only
/// records where both values are present.
///
/// Returns `InsufficientData` when fewer than two paired observations
/// remain or either side has zero variance; an undefined correlation is
/// never reported as zero.
pub fn correlate(series: &ObservationSeries, signal: &str) -> Result<f64> {
    let stats = paired_stats(series, signal)?;
    let coefficient = stats.cov / (stats.var_x * stats.var_y).sqrt();
    Ok(coefficient.clamp(-1.0, 1.0))
}

/// Ordinary least-squares fit of sales (dependent) against a signal
/// (independent), with the same pairing and failure rules as [`correlate`].
pub fn linear_fit(series: &ObservationSeries, signal: &str) -> Result<LinearFit> {
    let stats = paired_stats(series, signal)?;
    let slope = stats.cov / stats.var_x;
    let intercept = stats.mean_y - slope * stats.mean_x;
    let r_squared = (stats.cov * stats.cov) / (stats.var_x * stats.var_y);

    Ok(LinearFit {
        slope,
        intercept,
        r_squared: r_squared.clamp(0.0, 1.0),
    })
}

/// Correlate every declared signal against sales, in stable signal order.
///
/// Signals failing with `InsufficientData` are omitted and recorded in the
/// result's `skipped` list; any other error aborts the sweep.
pub fn correlate_all(series: &ObservationSeries) -> Result<CorrelationSet> {
    let mut coefficients = Vec::new();
    let mut skipped = Vec::new();

    for name in series.signal_names() {
        match correlate(series, name) {
            Ok(coefficient) => coefficients.push((name.clone(), coefficient)),
            Err(InsightError::InsufficientData(reason)) => {
                debug!(signal = %name, %reason, "skipping signal");
                skipped.push(name.clone());
            }
            Err(other) => return Err(other),
        }
    }

    debug!(
        computed = coefficients.len(),
        skipped = skipped.len(),
        "correlation sweep finished"
    );

    Ok(CorrelationSet {
        coefficients,
        skipped,
    })
}
