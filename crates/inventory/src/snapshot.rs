use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stocksense_core::ProductId;

use crate::forecast::ForecastPoint;
use crate::insight::CategoryInsight;
use crate::product::Product;
use crate::summary::DashboardSummary;

/// Past observed demand per product (chronological, oldest first).
///
/// Read-only input to the forecast estimator; the pipeline never appends to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalSeries(HashMap<ProductId, Vec<f64>>);

impl HistoricalSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, id: ProductId, series: Vec<f64>) -> Self {
        self.0.insert(id, series);
        self
    }

    /// Series for a product; empty when the product has no history.
    pub fn get(&self, id: &ProductId) -> &[f64] {
        self.0.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ProductId, Vec<f64>)> for HistoricalSeries {
    fn from_iter<T: IntoIterator<Item = (ProductId, Vec<f64>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Consumer-facing state as of the last committed refresh cycle.
///
/// A snapshot is built whole and then published; readers never observe a
/// half-applied cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    /// Number of committed refresh cycles (0 = seed state).
    pub cycle: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub products: Vec<Product>,
    pub category_insights: Vec<CategoryInsight>,
    pub forecast: Vec<ForecastPoint>,
}

impl InventorySnapshot {
    /// Seed snapshot before any cycle has run (no forecast yet).
    pub fn initial(products: Vec<Product>, category_insights: Vec<CategoryInsight>) -> Self {
        Self {
            cycle: 0,
            refreshed_at: None,
            products,
            category_insights,
            forecast: Vec::new(),
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_products(&self.products)
    }
}
