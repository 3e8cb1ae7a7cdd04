use serde::{Deserialize, Serialize};

use stocksense_core::{DomainError, DomainResult};

/// Aggregate stock/demand signal for one product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    pub category: String,
    pub total_stock: u32,
    pub average_demand: u32,
    /// Fraction in \[0, 1\].
    pub wastage_risk: f64,
}

impl CategoryInsight {
    pub fn new(
        category: impl Into<String>,
        total_stock: u32,
        average_demand: u32,
        wastage_risk: f64,
    ) -> DomainResult<Self> {
        let insight = Self {
            category: category.into(),
            total_stock,
            average_demand,
            wastage_risk,
        };
        insight.validate()?;
        Ok(insight)
    }

    /// Copy with perturbed totals; the wastage fraction is carried unchanged.
    pub fn with_totals(&self, total_stock: u32, average_demand: u32) -> Self {
        Self {
            total_stock,
            average_demand,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("insight category cannot be empty"));
        }
        if !(0.0..=1.0).contains(&self.wastage_risk) {
            return Err(DomainError::validation(format!(
                "insight {}: wastage risk must be within [0, 1], got {}",
                self.category, self.wastage_risk
            )));
        }
        Ok(())
    }
}
