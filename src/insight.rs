//! Consumer-facing summaries: percent changes, influence ranking, trend
//! classification, and group-difference impacts

use crate::correlate::CorrelationSet;
use crate::data::ObservationSeries;
use crate::error::{InsightError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::cmp::Ordering;

/// Percent change from `previous` to `current`, rounded to one decimal.
///
/// A zero previous value makes the change undefined; the error must be
/// surfaced as "not applicable", never rendered as 0%.
pub fn percent_change(current: f64, previous: f64) -> Result<f64> {
    if previous == 0.0 {
        return Err(InsightError::UndefinedChange(
            "Percent change against a zero previous value is undefined".to_string(),
        ));
    }

    let raw = (current - previous) / previous * 100.0;
    Ok((raw * 10.0).round() / 10.0)
}

/// Rank signals by descending absolute coefficient.
///
/// The sort is stable, so ties keep the set's signal order.
pub fn rank_influences(correlations: &CorrelationSet) -> Vec<(String, f64)> {
    let mut ranked = correlations.coefficients().to_vec();
    ranked.sort_by(|(_, a), (_, b)| {
        b.abs()
            .partial_cmp(&a.abs())
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// The signal with the largest absolute coefficient, if any
pub fn biggest_influence(correlations: &CorrelationSet) -> Option<(String, f64)> {
    rank_influences(correlations).into_iter().next()
}

/// Direction of a signed sales delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Classify a delta, treating magnitudes within `tolerance` as flat
    pub fn classify(delta: f64, tolerance: f64) -> Self {
        let tolerance = tolerance.abs();
        if delta > tolerance {
            Trend::Up
        } else if delta < -tolerance {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// Mean sales on days where a binary signal is set minus mean sales on
/// days where it is not (e.g. the average drop on bad-weather days).
///
/// Any nonzero value counts as "set". Both groups must be non-empty.
pub fn binary_impact(series: &ObservationSeries, signal: &str) -> Result<f64> {
    let pairs = series.paired(signal)?;

    let set: Vec<f64> = pairs
        .iter()
        .filter(|(x, _)| *x != 0.0)
        .map(|(_, y)| *y)
        .collect();
    let unset: Vec<f64> = pairs
        .iter()
        .filter(|(x, _)| *x == 0.0)
        .map(|(_, y)| *y)
        .collect();

    if set.is_empty() || unset.is_empty() {
        return Err(InsightError::InsufficientData(format!(
            "Signal '{}' needs sales on both set and unset days ({} set, {} unset)",
            signal,
            set.len(),
            unset.len()
        )));
    }

    Ok(set.iter().mean() - unset.iter().mean())
}
