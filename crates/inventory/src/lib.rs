//! Inventory data model for the refresh pipeline.
//!
//! This crate contains the shapes the pipeline produces and dashboard
//! collaborators consume, implemented as plain deterministic data (no IO, no
//! HTTP, no timers).

pub mod forecast;
pub mod insight;
pub mod product;
pub mod seed;
pub mod snapshot;
pub mod summary;

pub use forecast::{FORECAST_HORIZON, ForecastPoint};
pub use insight::CategoryInsight;
pub use product::{DemandTrend, Product, WastageRisk};
pub use seed::SeedCatalog;
pub use snapshot::{HistoricalSeries, InventorySnapshot};
pub use summary::{DashboardSummary, ProductSignal};
