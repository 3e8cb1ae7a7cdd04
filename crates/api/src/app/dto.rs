use std::time::Duration;

use serde::{Deserialize, Serialize};

use stocksense_infra::SchedulerState;

/// Bounds the dashboard settings control allows for the refresh interval.
pub const MIN_REFRESH_INTERVAL_MS: u64 = 5_000;
pub const MAX_REFRESH_INTERVAL_MS: u64 = 60_000;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRefreshIntervalRequest {
    pub interval_ms: u64,
}

impl SetRefreshIntervalRequest {
    pub fn clamped(&self) -> Duration {
        Duration::from_millis(
            self.interval_ms
                .clamp(MIN_REFRESH_INTERVAL_MS, MAX_REFRESH_INTERVAL_MS),
        )
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSettingsResponse {
    pub interval_ms: u64,
    pub state: SchedulerState,
}

impl RefreshSettingsResponse {
    pub fn new(interval: Duration, state: SchedulerState) -> Self {
        Self {
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            state,
        }
    }
}
