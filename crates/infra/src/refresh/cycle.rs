use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use rand::Rng;

use stocksense_ai::{Prediction, PredictionProvider};
use stocksense_inventory::{CategoryInsight, ForecastPoint, HistoricalSeries, InventorySnapshot, Product};

use crate::simulation::{self, InsightBasis};

/// Everything a cycle reads besides the previous snapshot.
#[derive(Clone)]
pub struct CycleContext {
    pub provider: Arc<dyn PredictionProvider>,
    pub history: Arc<HistoricalSeries>,
    /// Seed insights, used when `basis` is [`InsightBasis::Baseline`].
    pub baseline_insights: Arc<[CategoryInsight]>,
    pub basis: InsightBasis,
}

impl core::fmt::Debug for CycleContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CycleContext")
            .field("history", &self.history.len())
            .field("baseline_insights", &self.baseline_insights.len())
            .field("basis", &self.basis)
            .finish_non_exhaustive()
    }
}

/// Next state computed by one cycle, not yet committed.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutput {
    pub products: Vec<Product>,
    pub category_insights: Vec<CategoryInsight>,
    pub forecast: Vec<ForecastPoint>,
    /// Products whose prediction came from the local estimator.
    pub fallbacks: usize,
}

impl CycleContext {
    /// Compute the next state from `previous`.
    ///
    /// Random draws happen before and after the prediction batch, never
    /// interleaved with it, so a seeded `rng` yields the same stock/insight/
    /// forecast values regardless of the order predictions complete in.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        previous: &InventorySnapshot,
        rng: &mut R,
        today: NaiveDate,
    ) -> CycleOutput {
        let deltas: Vec<i64> = previous
            .products
            .iter()
            .map(|_| simulation::stock_delta(rng))
            .collect();

        let predictions: Vec<Prediction> = join_all(
            previous
                .products
                .iter()
                .map(|product| self.provider.predict(product, self.history.get(&product.id))),
        )
        .await;

        let fallbacks = predictions.iter().filter(|p| p.is_fallback()).count();

        let products = previous
            .products
            .iter()
            .zip(deltas)
            .zip(&predictions)
            .map(|((product, delta), prediction)| {
                product.with_refresh(
                    simulation::apply_delta(product.current_stock, delta),
                    prediction.value(),
                )
            })
            .collect();

        let insight_source: &[CategoryInsight] = match self.basis {
            InsightBasis::Previous => &previous.category_insights,
            InsightBasis::Baseline => &self.baseline_insights[..],
        };
        let category_insights = simulation::perturb_insights(rng, insight_source);
        let forecast = simulation::forecast_series(rng, today);

        CycleOutput {
            products,
            category_insights,
            forecast,
            fallbacks,
        }
    }
}
