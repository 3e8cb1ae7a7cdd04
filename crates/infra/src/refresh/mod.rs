//! Real-time prediction refresh pipeline.
//!
//! A [`RefreshScheduler`] owns a timer and runs one [`cycle`] per tick:
//! predictions for every product are requested concurrently, stock and
//! insights are perturbed, the forecast series is redrawn, and the result is
//! committed to the [`InventoryStore`](crate::store::InventoryStore) in one
//! step once every prediction has resolved.

pub mod cycle;
pub mod scheduler;

use std::time::Duration;

use thiserror::Error;

use crate::simulation::InsightBasis;

pub use cycle::{CycleContext, CycleOutput};
pub use scheduler::{RefreshScheduler, SchedulerState};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Time between cycles. Any positive duration is accepted here; UI-level
    /// bounds are the caller's concern.
    pub interval: Duration,
    /// Seed for the simulation RNG; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub insight_basis: InsightBasis,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            seed: None,
            insight_basis: InsightBasis::default(),
        }
    }
}

impl RefreshConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_insight_basis(mut self, basis: InsightBasis) -> Self {
        self.insight_basis = basis;
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    /// A zero interval would arm a busy-looping timer.
    #[error("refresh interval must be greater than zero")]
    InvalidInterval,

    #[error("refresh scheduler must be started from within a tokio runtime")]
    NoRuntime,
}

pub(crate) fn validate_interval(interval: Duration) -> Result<Duration, RefreshError> {
    if interval.is_zero() {
        return Err(RefreshError::InvalidInterval);
    }
    Ok(interval)
}
