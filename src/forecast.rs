//! Additive, correlation-weighted sales projection over future conditions

use crate::baseline::BaselineContext;
use crate::correlate::CorrelationSet;
use crate::error::{InsightError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Caller-supplied projected conditions for one future day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturePoint {
    /// The future date
    pub date: NaiveDate,
    /// Projected signal values for that date
    pub signals: HashMap<String, f64>,
}

impl FuturePoint {
    /// Create a point with no projected signals
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            signals: HashMap::new(),
        }
    }

    /// Attach a projected signal value
    pub fn with_signal(mut self, name: &str, value: f64) -> Self {
        self.signals.insert(name.to_string(), value);
        self
    }
}

/// One projected day of sales, with the per-signal dollar contributions
/// that explain the prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// The future date
    pub date: NaiveDate,
    /// Predicted sales for that date
    pub predicted_sales: f64,
    /// Signed change versus the previous point's prediction, or versus
    /// the baseline for the first point
    pub delta: f64,
    /// Each contributing signal's share of the adjustment, in stable
    /// signal order
    pub contributions: Vec<(String, f64)>,
}

/// Projects sales over future conditions with an additive model: the
/// baseline level adjusted by each signal's correlation-weighted relative
/// deviation from its historical mean, damped so several simultaneously
/// shifted signals do not overshoot.
///
/// By default each term is divided by K, the number of signals actually
/// contributing to that point. A fixed damping factor can be configured
/// instead via [`ForecastEngine::with_damping`].
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    damping: Option<f64>,
}

impl ForecastEngine {
    /// Engine with per-point damping by contributing-signal count
    pub fn new() -> Self {
        Self { damping: None }
    }

    /// Engine with a fixed damping factor instead of the per-point count
    pub fn with_damping(factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(InsightError::InvalidParameter(format!(
                "Damping factor must be finite and positive, got {}",
                factor
            )));
        }
        Ok(Self {
            damping: Some(factor),
        })
    }

    /// Project sales for each future point.
    ///
    /// A signal contributes to a point only when it has a correlation
    /// coefficient, a projected value, and a nonzero historical mean; a
    /// zero-mean signal is excluded entirely (it adds nothing and does not
    /// count toward the damping divisor), so the result matches a forecast
    /// with that signal omitted. Future dates must be strictly increasing
    /// and strictly after the baseline reference date.
    pub fn project(
        &self,
        baseline: &BaselineContext,
        correlations: &CorrelationSet,
        future: &[FuturePoint],
    ) -> Result<Vec<ForecastPoint>> {
        let mut last = baseline.reference_date();
        for point in future {
            if point.date <= last {
                return Err(InsightError::InvalidSequence(format!(
                    "Future dates must be strictly increasing after {}: got {}",
                    last, point.date
                )));
            }
            last = point.date;

            for (name, value) in &point.signals {
                if !value.is_finite() {
                    return Err(InsightError::DataError(format!(
                        "Projected value for signal '{}' on {} is not finite",
                        name, point.date
                    )));
                }
            }
        }

        let baseline_sales = baseline.baseline_sales();
        let mut forecast = Vec::with_capacity(future.len());
        let mut previous = baseline_sales;

        for point in future {
            let mut terms: Vec<(&str, f64)> = Vec::new();
            for (name, mean) in baseline.signal_means() {
                let Some(coefficient) = correlations.get(name) else {
                    continue;
                };
                let Some(value) = point.signals.get(name).copied() else {
                    continue;
                };
                if *mean == 0.0 {
                    debug!(signal = %name, date = %point.date, "zero historical mean; excluding signal");
                    continue;
                }

                let deviation = (value - mean) / mean;
                terms.push((name.as_str(), coefficient * baseline_sales * deviation));
            }

            let damping = match self.damping {
                Some(factor) => factor,
                None => terms.len().max(1) as f64,
            };

            let mut predicted = baseline_sales;
            let mut contributions = Vec::with_capacity(terms.len());
            for (name, raw) in terms {
                let contribution = raw / damping;
                predicted += contribution;
                contributions.push((name.to_string(), contribution));
            }

            let delta = predicted - previous;
            previous = predicted;

            forecast.push(ForecastPoint {
                date: point.date,
                predicted_sales: predicted,
                delta,
                contributions,
            });
        }

        debug!(points = forecast.len(), "sales projection finished");
        Ok(forecast)
    }
}
