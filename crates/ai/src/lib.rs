//! `stocksense-ai`
//!
//! **Responsibility:** demand prediction boundary.
//!
//! - The local forecast estimator is a pure function over a demand history.
//! - Providers always resolve to a value; failures are carried as a
//!   [`Prediction::Fallback`] outcome, never raised to the caller.
//! - This crate does no IO itself; the HTTP-backed provider lives in infra.

pub mod estimator;
pub mod prediction;
pub mod result;

pub use estimator::{FORECAST_WINDOW, estimate};
pub use prediction::{LocalForecastProvider, PredictionProvider};
pub use result::{InferenceError, Prediction};
