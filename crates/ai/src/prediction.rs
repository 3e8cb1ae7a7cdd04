use async_trait::async_trait;

use stocksense_inventory::Product;

use crate::estimator::estimate;
use crate::result::{InferenceError, Prediction};

/// Source of per-product demand predictions.
///
/// Implementations must always resolve: any failure on the way to a model
/// value is reported as [`Prediction::Fallback`] carrying the local estimate.
#[async_trait]
pub trait PredictionProvider: Send + Sync + 'static {
    /// Predict demand for `product` given its demand history.
    async fn predict(&self, product: &Product, history: &[f64]) -> Prediction;

    /// Convenience wrapper returning only the predicted quantity.
    async fn predict_value(&self, product: &Product, history: &[f64]) -> u32 {
        self.predict(product, history).await.value()
    }
}

#[async_trait]
impl<P> PredictionProvider for std::sync::Arc<P>
where
    P: PredictionProvider + ?Sized,
{
    async fn predict(&self, product: &Product, history: &[f64]) -> Prediction {
        (**self).predict(product, history).await
    }
}

/// Provider that never leaves the process: always the local estimator.
#[derive(Debug, Default, Copy, Clone)]
pub struct LocalForecastProvider;

impl LocalForecastProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PredictionProvider for LocalForecastProvider {
    async fn predict(&self, product: &Product, history: &[f64]) -> Prediction {
        tracing::trace!(product = %product.id, "using local forecast estimator");
        Prediction::fallback(estimate(history), InferenceError::MissingCredential)
    }
}
