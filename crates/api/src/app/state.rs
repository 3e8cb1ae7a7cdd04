use std::sync::Arc;

use tokio::sync::Mutex;

use stocksense_infra::{InventoryStore, RefreshScheduler};
use stocksense_inventory::InventorySnapshot;

/// Shared by all handlers.
///
/// Reads go straight to the store; only interval changes and manual
/// refreshes take the scheduler lock.
#[derive(Debug)]
pub struct AppState {
    scheduler: Mutex<RefreshScheduler>,
    store: Arc<InventoryStore>,
}

impl AppState {
    pub fn new(scheduler: RefreshScheduler) -> Self {
        let store = scheduler.store().clone();
        Self {
            scheduler: Mutex::new(scheduler),
            store,
        }
    }

    pub fn snapshot(&self) -> Arc<InventorySnapshot> {
        self.store.snapshot()
    }

    pub fn scheduler(&self) -> &Mutex<RefreshScheduler> {
        &self.scheduler
    }

    /// Stop the scheduler; used on server shutdown.
    pub async fn shutdown(&self) {
        self.scheduler.lock().await.stop().await;
    }
}
