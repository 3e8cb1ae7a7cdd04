use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;

use stocksense_inventory::{CategoryInsight, ForecastPoint, InventorySnapshot, Product};

/// Holds the latest committed snapshot.
///
/// Readers get an `Arc` to a complete snapshot; a commit swaps the whole
/// snapshot (and bumps the cycle counter) under one write lock, so no reader
/// can observe a partially applied cycle.
#[derive(Debug)]
pub struct InventoryStore {
    inner: RwLock<Arc<InventorySnapshot>>,
}

impl InventoryStore {
    pub fn new(initial: InventorySnapshot) -> Self {
        Self {
            inner: RwLock::new(Arc::new(initial)),
        }
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> Arc<InventorySnapshot> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of cycles committed so far.
    pub fn cycle(&self) -> u64 {
        self.snapshot().cycle
    }

    /// Publish the output of a completed cycle.
    pub fn commit(
        &self,
        products: Vec<Product>,
        category_insights: Vec<CategoryInsight>,
        forecast: Vec<ForecastPoint>,
    ) -> Arc<InventorySnapshot> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(InventorySnapshot {
            cycle: guard.cycle + 1,
            refreshed_at: Some(Utc::now()),
            products,
            category_insights,
            forecast,
        });
        *guard = next.clone();
        next
    }
}
