use serde::{Deserialize, Serialize};

use stocksense_core::ProductId;

use crate::product::{DemandTrend, Product, WastageRisk};

/// Per-product derived signals shown next to the inventory table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSignal {
    pub id: ProductId,
    pub low_stock: bool,
    pub needs_reorder: bool,
    pub demand_trend: DemandTrend,
}

/// Dashboard headline numbers derived from a product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub low_stock_alerts: usize,
    pub reorder_alerts: usize,
    pub high_wastage_risk: usize,
    /// Sum of `predicted_demand * price`, rounded to cents.
    pub predicted_revenue: f64,
    pub signals: Vec<ProductSignal>,
}

impl DashboardSummary {
    pub fn from_products(products: &[Product]) -> Self {
        let revenue: f64 = products.iter().map(Product::predicted_revenue).sum();

        Self {
            total_products: products.len(),
            low_stock_alerts: products.iter().filter(|p| p.is_low_stock()).count(),
            reorder_alerts: products.iter().filter(|p| p.needs_reorder()).count(),
            high_wastage_risk: products
                .iter()
                .filter(|p| p.wastage_risk == WastageRisk::High)
                .count(),
            predicted_revenue: (revenue * 100.0).round() / 100.0,
            signals: products
                .iter()
                .map(|p| ProductSignal {
                    id: p.id.clone(),
                    low_stock: p.is_low_stock(),
                    needs_reorder: p.needs_reorder(),
                    demand_trend: p.demand_trend(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::sample_product;

    #[test]
    fn empty_catalog_summarizes_to_zero() {
        let s = DashboardSummary::from_products(&[]);
        assert_eq!(s.total_products, 0);
        assert_eq!(s.predicted_revenue, 0.0);
        assert!(s.signals.is_empty());
    }

    #[test]
    fn counts_alerts_and_revenue() {
        let a = sample_product("1"); // 180 * 2.99 = 538.20
        let mut b = sample_product("2").with_refresh(10, 5); // 5 * 2.99 = 14.95
        b.wastage_risk = WastageRisk::Low;

        let s = DashboardSummary::from_products(&[a, b]);
        assert_eq!(s.total_products, 2);
        assert_eq!(s.low_stock_alerts, 1);
        assert_eq!(s.reorder_alerts, 1);
        assert_eq!(s.high_wastage_risk, 1);
        assert!((s.predicted_revenue - 553.15).abs() < 1e-9);
        assert_eq!(s.signals[0].demand_trend, DemandTrend::Rising);
        assert_eq!(s.signals[1].demand_trend, DemandTrend::Falling);
    }
}
