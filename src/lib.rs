//! # Sales Insight
//!
//! A Rust library for explaining and projecting daily retail sales from
//! contextual signals (temperature, foot traffic, events, review scores).
//!
//! ## Features
//!
//! - Daily observation series with explicit absent markers and a CSV loader
//! - Pearson correlation and single-variable linear regression per signal
//! - Additive, correlation-weighted short-horizon sales forecasting
//! - Influence ranking, percent changes, and trend classification
//! - A provider seam so external data sources stay out of the pure core
//!
//! The analytical core is stateless and pure: every call receives its own
//! input snapshot, performs no I/O, and is safe to run from parallel tasks.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use sales_insight::baseline::BaselineContext;
//! use sales_insight::correlate;
//! use sales_insight::data::{DailyRecord, ObservationSeries};
//! use sales_insight::forecast::{ForecastEngine, FuturePoint};
//!
//! let mut records = Vec::new();
//! for (day, (sales, temp)) in [(310.0, 70.0), (289.0, 66.0), (330.0, 74.0), (295.0, 68.0)]
//!     .into_iter()
//!     .enumerate()
//! {
//!     let date = NaiveDate::from_ymd_opt(2023, 6, 1 + day as u32).unwrap();
//!     records.push(DailyRecord::new(date, Some(sales)).with_signal("temperature", temp));
//! }
//! let series = ObservationSeries::new(vec!["temperature".to_string()], records)?;
//!
//! // How strongly does each signal track sales?
//! let correlations = correlate::correlate_all(&series)?;
//!
//! // Project tomorrow's sales from forecast conditions
//! let baseline = BaselineContext::from_series(&series, 4)?;
//! let tomorrow = FuturePoint::new(NaiveDate::from_ymd_opt(2023, 6, 5).unwrap())
//!     .with_signal("temperature", 76.0);
//! let forecast = ForecastEngine::new().project(&baseline, &correlations, &[tomorrow])?;
//! assert_eq!(forecast.len(), 1);
//! # Ok::<(), sales_insight::error::InsightError>(())
//! ```

pub mod baseline;
pub mod correlate;
pub mod data;
pub mod error;
pub mod forecast;
pub mod insight;
pub mod providers;

// Re-export commonly used types
pub use crate::baseline::BaselineContext;
pub use crate::correlate::{CorrelationSet, LinearFit};
pub use crate::data::{DailyRecord, ObservationSeries};
pub use crate::error::{InsightError, Result};
pub use crate::forecast::{ForecastEngine, ForecastPoint, FuturePoint};
pub use crate::insight::Trend;
pub use crate::providers::SignalProvider;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
