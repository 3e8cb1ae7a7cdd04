//! Infrastructure layer: inference client, state store, refresh scheduling, config.

pub mod config;
pub mod inference;
pub mod refresh;
pub mod simulation;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use inference::{CredentialSource, HttpPredictionProvider, InferenceConfig};
pub use refresh::{RefreshConfig, RefreshError, RefreshScheduler, SchedulerState};
pub use simulation::InsightBasis;
pub use store::InventoryStore;
