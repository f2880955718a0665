//! Signal providers: the seam between external data sources and the pure
//! analytical core.
//!
//! Real integrations (weather APIs, review feeds, traffic data) implement
//! [`SignalProvider`] and are injected into forecast assembly; the core
//! never calls out itself. [`FixedSignal`] covers tests and demos, and
//! [`SimulatedHistory`] generates a reproducible synthetic series.

use crate::data::{DailyRecord, ObservationSeries};
use crate::error::{InsightError, Result};
use crate::forecast::FuturePoint;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of projected values for one named signal
pub trait SignalProvider {
    /// The signal this provider feeds
    fn name(&self) -> &str;

    /// Projected value of the signal on a future date
    fn project(&self, date: NaiveDate) -> Result<f64>;
}

/// Provider returning a constant value regardless of date
#[derive(Debug, Clone)]
pub struct FixedSignal {
    name: String,
    value: f64,
}

impl FixedSignal {
    /// Create a constant provider
    pub fn new(name: &str, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(InsightError::InvalidParameter(format!(
                "Fixed value for signal '{}' must be finite",
                name
            )));
        }
        Ok(Self {
            name: name.to_string(),
            value,
        })
    }
}

impl SignalProvider for FixedSignal {
    fn name(&self) -> &str {
        &self.name
    }

    fn project(&self, _date: NaiveDate) -> Result<f64> {
        Ok(self.value)
    }
}

/// Assemble a [`FuturePoint`] for a date from a set of providers
pub fn future_point(date: NaiveDate, providers: &[&dyn SignalProvider]) -> Result<FuturePoint> {
    let mut point = FuturePoint::new(date);
    for provider in providers {
        let value = provider.project(date)?;
        point.signals.insert(provider.name().to_string(), value);
    }
    Ok(point)
}

/// Generator for a synthetic daily sales history with temperature,
/// foot-traffic, and event-day signals. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct SimulatedHistory {
    seed: u64,
    days: usize,
}

impl SimulatedHistory {
    /// Signal names carried by generated series, in stable order
    pub const SIGNALS: [&'static str; 3] = ["temperature", "foot_traffic", "event_day"];

    /// Create a generator covering `days` consecutive days
    pub fn new(seed: u64, days: usize) -> Result<Self> {
        if days < 2 {
            return Err(InsightError::InvalidParameter(
                "A simulated history needs at least 2 days".to_string(),
            ));
        }
        Ok(Self { seed, days })
    }

    /// Generate the series starting on `start`.
    ///
    /// Sales are built from the signals plus noise, so the generated data
    /// carries real correlations for the analysis to find.
    pub fn generate(&self, start: NaiveDate) -> Result<ObservationSeries> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut records = Vec::with_capacity(self.days);

        for offset in 0..self.days {
            let date = start + Duration::days(offset as i64);
            let temperature: f64 = rng.gen_range(50.0..80.0);
            let foot_traffic = rng.gen_range(40.0..100.0);
            let event_day = if rng.gen_bool(0.3) { 1.0 } else { 0.0 };
            let noise = rng.gen_range(-15.0..15.0);

            let sales = (300.0
                + 1.5 * (temperature - 65.0)
                + 0.8 * (foot_traffic - 70.0)
                + 40.0 * event_day
                + noise)
                .max(0.0);

            records.push(
                DailyRecord::new(date, Some(sales))
                    .with_signal("temperature", temperature)
                    .with_signal("foot_traffic", foot_traffic)
                    .with_signal("event_day", event_day),
            );
        }

        ObservationSeries::new(
            Self::SIGNALS.iter().map(|s| s.to_string()).collect(),
            records,
        )
    }
}
