//! Baseline catalog the pipeline starts from.
//!
//! The randomized catalog extension used by demo front-ends is not generated
//! here; this is the fixed, hand-curated part of the store plus the simulated
//! demand history available for the first few products.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use stocksense_core::{DomainError, DomainResult, ProductId};

use crate::insight::CategoryInsight;
use crate::product::{Product, WastageRisk};
use crate::snapshot::{HistoricalSeries, InventorySnapshot};

/// Products, category insights, and demand history that seed a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedCatalog {
    pub products: Vec<Product>,
    pub insights: Vec<CategoryInsight>,
    pub history: HistoricalSeries,
}

// (id, name, category, stock, min, price, shelf-life days, velocity, demand, reorder, risk)
type Row = (
    &'static str,
    &'static str,
    &'static str,
    u32,
    u32,
    f64,
    u64,
    f64,
    u32,
    u32,
    WastageRisk,
);

const PRODUCTS: &[Row] = &[
    ("1", "Organic Bananas", "Produce", 150, 50, 2.99, 7, 25.0, 180, 75, WastageRisk::High),
    ("2", "Organic Baby Spinach", "Produce", 80, 30, 4.99, 5, 15.0, 95, 40, WastageRisk::High),
    ("3", "Roma Tomatoes", "Produce", 200, 60, 1.99, 6, 35.0, 220, 80, WastageRisk::Medium),
    ("4", "Avocados", "Produce", 120, 40, 1.49, 4, 30.0, 140, 60, WastageRisk::High),
    ("5", "Sweet Potatoes", "Produce", 180, 50, 1.29, 14, 20.0, 160, 70, WastageRisk::Low),
    ("6", "Whole Milk", "Dairy", 200, 75, 3.99, 10, 40.0, 220, 100, WastageRisk::Medium),
    ("7", "Greek Yogurt", "Dairy", 150, 50, 5.99, 14, 25.0, 170, 70, WastageRisk::Medium),
    ("8", "Sharp Cheddar", "Dairy", 100, 30, 6.99, 30, 15.0, 110, 40, WastageRisk::Low),
    ("9", "Whole Wheat Bread", "Bakery", 85, 30, 4.49, 5, 15.0, 90, 45, WastageRisk::High),
    ("10", "Croissants", "Bakery", 60, 20, 1.99, 2, 20.0, 75, 30, WastageRisk::High),
    ("11", "Ground Beef 80/20", "Meat & Seafood", 120, 40, 5.99, 5, 25.0, 130, 60, WastageRisk::High),
    ("12", "Atlantic Salmon", "Meat & Seafood", 80, 25, 12.99, 3, 15.0, 90, 35, WastageRisk::High),
    ("13", "Extra Virgin Olive Oil", "Pantry", 150, 40, 15.99, 365, 10.0, 130, 50, WastageRisk::Low),
    ("14", "Jasmine Rice", "Pantry", 200, 50, 8.99, 365, 15.0, 180, 70, WastageRisk::Low),
    ("15", "Sparkling Water", "Beverages", 300, 100, 0.99, 365, 50.0, 320, 150, WastageRisk::Low),
    ("16", "Orange Juice", "Beverages", 180, 60, 4.99, 14, 30.0, 200, 80, WastageRisk::Medium),
    ("17", "Frozen Pizza", "Frozen Foods", 150, 40, 6.99, 180, 20.0, 160, 60, WastageRisk::Low),
    ("18", "Ice Cream", "Frozen Foods", 100, 30, 5.99, 180, 25.0, 120, 40, WastageRisk::Low),
    ("19", "Potato Chips", "Snacks", 250, 80, 3.99, 60, 40.0, 270, 100, WastageRisk::Low),
    ("20", "Mixed Nuts", "Snacks", 120, 35, 8.99, 90, 15.0, 130, 45, WastageRisk::Low),
];

const INSIGHTS: &[(&str, u32, u32, f64)] = &[
    ("Produce", 3500, 3200, 0.15),
    ("Dairy", 2800, 2600, 0.08),
    ("Bakery", 1200, 1100, 0.12),
    ("Meat & Seafood", 1800, 1650, 0.18),
    ("Pantry", 4200, 3800, 0.05),
    ("Beverages", 3200, 3000, 0.03),
    ("Frozen Foods", 2400, 2200, 0.04),
    ("Snacks", 2800, 2600, 0.06),
];

const HISTORY: &[(&str, [f64; 7])] = &[
    ("1", [120.0, 140.0, 135.0, 150.0, 145.0, 160.0, 155.0]),
    ("2", [180.0, 190.0, 185.0, 200.0, 195.0, 210.0, 205.0]),
    ("3", [75.0, 80.0, 85.0, 90.0, 85.0, 95.0, 90.0]),
];

impl SeedCatalog {
    /// Built-in store catalog with expiry dates relative to `today`.
    pub fn baseline(today: NaiveDate) -> DomainResult<Self> {
        let products = PRODUCTS
            .iter()
            .map(
                |&(id, name, category, stock, min, price, shelf_days, velocity, demand, reorder, risk)|
                 -> DomainResult<Product> {
                    Ok(Product {
                        id: ProductId::new(id)?,
                        name: name.to_string(),
                        category: category.to_string(),
                        current_stock: stock,
                        min_threshold: min,
                        reorder_point: reorder,
                        price,
                        expiry_date: today.checked_add_days(Days::new(shelf_days)),
                        sales_velocity: velocity,
                        predicted_demand: demand,
                        wastage_risk: risk,
                    })
                },
            )
            .collect::<DomainResult<Vec<_>>>()?;

        let insights = INSIGHTS
            .iter()
            .map(|&(category, stock, demand, risk)| CategoryInsight::new(category, stock, demand, risk))
            .collect::<DomainResult<Vec<_>>>()?;

        let history = HISTORY
            .iter()
            .map(|(id, series)| -> DomainResult<(ProductId, Vec<f64>)> {
                Ok((ProductId::new(*id)?, series.to_vec()))
            })
            .collect::<DomainResult<HistoricalSeries>>()?;

        Self::from_parts(products, insights, history)
    }

    /// Validate and assemble a catalog.
    pub fn from_parts(
        products: Vec<Product>,
        insights: Vec<CategoryInsight>,
        history: HistoricalSeries,
    ) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id.clone()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        for insight in &insights {
            insight.validate()?;
        }

        Ok(Self {
            products,
            insights,
            history,
        })
    }

    /// Seed snapshot plus the history the estimator reads.
    pub fn into_parts(self) -> (InventorySnapshot, Vec<CategoryInsight>, HistoricalSeries) {
        let baseline = self.insights.clone();
        (
            InventorySnapshot::initial(self.products, self.insights),
            baseline,
            self.history,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::sample_product;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn baseline_catalog_is_valid() {
        let seed = SeedCatalog::baseline(today()).unwrap();
        assert_eq!(seed.products.len(), 20);
        assert_eq!(seed.insights.len(), 8);
        assert_eq!(seed.history.len(), 3);

        let bananas = &seed.products[0];
        assert_eq!(bananas.name, "Organic Bananas");
        assert_eq!(bananas.expiry_date, NaiveDate::from_ymd_opt(2026, 10, 26));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = SeedCatalog::from_parts(
            vec![sample_product("1"), sample_product("1")],
            vec![],
            HistoricalSeries::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn into_parts_starts_at_cycle_zero() {
        let (snapshot, baseline, history) = SeedCatalog::baseline(today()).unwrap().into_parts();
        assert_eq!(snapshot.cycle, 0);
        assert_eq!(snapshot.category_insights, baseline);
        assert_eq!(history.get(&ProductId::new("3").unwrap()).len(), 7);
    }
}
