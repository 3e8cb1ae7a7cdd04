use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stocksense_core::{DomainError, DomainResult, ProductId};

/// Categorical spoilage likelihood carried on each product.
///
/// Not computed by the pipeline; it is catalog data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WastageRisk {
    Low,
    Medium,
    High,
}

impl WastageRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            WastageRisk::Low => "low",
            WastageRisk::Medium => "medium",
            WastageRisk::High => "high",
        }
    }
}

/// Direction of predicted demand relative to what is on the shelf.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandTrend {
    /// Predicted demand exceeds current stock.
    Rising,
    Falling,
}

/// A tracked product.
///
/// Products are replaced wholesale by each refresh cycle (see the `with_*`
/// builders); nothing mutates a product held by a committed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub current_stock: u32,
    pub min_threshold: u32,
    pub reorder_point: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub sales_velocity: f64,
    pub predicted_demand: u32,
    pub wastage_risk: WastageRisk,
}

impl Product {
    /// Copy of this product with a new stock level.
    pub fn with_stock(&self, current_stock: u32) -> Self {
        Self {
            current_stock,
            ..self.clone()
        }
    }

    /// Copy of this product with a new stock level and prediction, applied together.
    pub fn with_refresh(&self, current_stock: u32, predicted_demand: u32) -> Self {
        Self {
            current_stock,
            predicted_demand,
            ..self.clone()
        }
    }

    /// Stock has dropped below the minimum threshold.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock < self.min_threshold
    }

    pub fn needs_reorder(&self) -> bool {
        self.current_stock <= self.reorder_point
    }

    pub fn demand_trend(&self) -> DemandTrend {
        if self.predicted_demand > self.current_stock {
            DemandTrend::Rising
        } else {
            DemandTrend::Falling
        }
    }

    /// Predicted revenue for this product (`predicted_demand * price`).
    pub fn predicted_revenue(&self) -> f64 {
        f64::from(self.predicted_demand) * self.price
    }

    /// Check descriptive and numeric attributes.
    ///
    /// Quantities are unsigned, so only the floating point fields need a
    /// non-negativity check.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: name cannot be empty",
                self.id
            )));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: category cannot be empty",
                self.id
            )));
        }
        if !(self.price.is_finite() && self.price >= 0.0) {
            return Err(DomainError::validation(format!(
                "product {}: price must be a finite non-negative number",
                self.id
            )));
        }
        if !(self.sales_velocity.is_finite() && self.sales_velocity >= 0.0) {
            return Err(DomainError::validation(format!(
                "product {}: sales velocity must be a finite non-negative number",
                self.id
            )));
        }
        Ok(())
    }
}
