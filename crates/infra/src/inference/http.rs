use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stocksense_ai::{InferenceError, Prediction, PredictionProvider, estimate};
use stocksense_inventory::Product;

use super::{CredentialSource, InferenceConfig};
use crate::config::ConfigError;

/// Request envelope sent to the inference endpoint.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: InferenceInputs<'a>,
}

#[derive(Debug, Serialize)]
struct InferenceInputs<'a> {
    historical_data: &'a [f64],
    product_category: &'a str,
    current_stock: u32,
    sales_velocity: f64,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    prediction: f64,
}

/// Prediction provider backed by an external inference service.
///
/// - No credential: local estimate, no network call.
/// - Any failure (network, non-2xx, timeout, malformed body): local estimate.
/// - Success: the model value rounded to the nearest integer, floored at 0.
#[derive(Debug, Clone)]
pub struct HttpPredictionProvider {
    client: reqwest::Client,
    endpoint: String,
    credential: CredentialSource,
    timeout: Duration,
}

impl HttpPredictionProvider {
    pub fn new(config: InferenceConfig) -> Result<Self, ConfigError> {
        if config.timeout.is_zero() {
            return Err(ConfigError::invalid(
                "inference timeout",
                "0",
                "timeout must be positive",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            credential: config.credential,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request_prediction(
        &self,
        token: &str,
        product: &Product,
        history: &[f64],
    ) -> Result<u32, InferenceError> {
        let body = InferenceRequest {
            inputs: InferenceInputs {
                historical_data: history,
                product_category: &product.category,
                current_stock: product.current_stock,
                sales_velocity: product.sales_velocity,
            },
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(InferenceError::Status(status.as_u16()));
        }

        let parsed: InferenceResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout
            } else {
                InferenceError::Malformed(e.to_string())
            }
        })?;

        if !parsed.prediction.is_finite() {
            return Err(InferenceError::Malformed(format!(
                "prediction is not a finite number: {}",
                parsed.prediction
            )));
        }

        Ok(parsed.prediction.round().max(0.0) as u32)
    }
}

fn classify_transport_error(e: reqwest::Error) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout
    } else {
        InferenceError::Network(e.to_string())
    }
}

#[async_trait]
impl PredictionProvider for HttpPredictionProvider {
    async fn predict(&self, product: &Product, history: &[f64]) -> Prediction {
        let Some(token) = self.credential.resolve() else {
            debug!(product = %product.id, "no inference credential; using local estimate");
            return Prediction::fallback(estimate(history), InferenceError::MissingCredential);
        };

        let outcome = tokio::time::timeout(
            self.timeout,
            self.request_prediction(&token, product, history),
        )
        .await
        .unwrap_or(Err(InferenceError::Timeout));

        match outcome {
            Ok(value) => Prediction::model(value),
            Err(reason) => {
                warn!(product = %product.id, error = %reason, "inference failed; using local estimate");
                Prediction::fallback(estimate(history), reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use stocksense_core::ProductId;
    use stocksense_inventory::WastageRisk;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HISTORY: [f64; 3] = [10.0, 20.0, 30.0];

    fn product() -> Product {
        Product {
            id: ProductId::new("2").unwrap(),
            name: "Organic Baby Spinach".to_string(),
            category: "Produce".to_string(),
            current_stock: 80,
            min_threshold: 30,
            reorder_point: 40,
            price: 4.99,
            expiry_date: None,
            sales_velocity: 15.0,
            predicted_demand: 95,
            wastage_risk: WastageRisk::High,
        }
    }

    fn provider(server: &MockServer, credential: CredentialSource) -> HttpPredictionProvider {
        HttpPredictionProvider::new(
            InferenceConfig::default()
                .with_endpoint(format!("{}/models/demand", server.uri()))
                .with_timeout(Duration::from_millis(300))
                .with_credential(credential),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_credential_never_touches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prediction": 999 })))
            .expect(0)
            .mount(&server)
            .await;

        let prediction = provider(&server, CredentialSource::none())
            .predict(&product(), &HISTORY)
            .await;

        assert_eq!(prediction.value(), estimate(&HISTORY));
        assert_eq!(
            prediction.fallback_reason(),
            Some(&InferenceError::MissingCredential)
        );
    }

    #[tokio::test]
    async fn successful_call_sends_payload_and_rounds_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/demand"))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_json(json!({
                "inputs": {
                    "historical_data": [10.0, 20.0, 30.0],
                    "product_category": "Produce",
                    "current_stock": 80,
                    "sales_velocity": 15.0
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prediction": 41.6 })))
            .expect(1)
            .mount(&server)
            .await;

        let prediction = provider(&server, CredentialSource::fixed("hf_test"))
            .predict(&product(), &HISTORY)
            .await;

        assert_eq!(prediction, Prediction::model(42));
    }

    #[tokio::test]
    async fn negative_model_values_are_floored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prediction": -7.2 })))
            .mount(&server)
            .await;

        let prediction = provider(&server, CredentialSource::fixed("hf_test"))
            .predict(&product(), &HISTORY)
            .await;

        assert_eq!(prediction, Prediction::model(0));
    }

    #[tokio::test]
    async fn non_success_status_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let prediction = provider(&server, CredentialSource::fixed("hf_test"))
            .predict(&product(), &HISTORY)
            .await;

        assert_eq!(prediction.value(), estimate(&HISTORY));
        assert_eq!(prediction.fallback_reason(), Some(&InferenceError::Status(503)));
    }

    #[tokio::test]
    async fn malformed_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "label": "POSITIVE" })))
            .mount(&server)
            .await;

        let prediction = provider(&server, CredentialSource::fixed("hf_test"))
            .predict(&product(), &HISTORY)
            .await;

        assert_eq!(prediction.value(), estimate(&HISTORY));
        assert!(matches!(
            prediction.fallback_reason(),
            Some(InferenceError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn slow_service_times_out_and_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "prediction": 500 }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let prediction = provider(&server, CredentialSource::fixed("hf_test"))
            .predict(&product(), &HISTORY)
            .await;

        assert_eq!(prediction.value(), estimate(&HISTORY));
        assert_eq!(prediction.fallback_reason(), Some(&InferenceError::Timeout));
    }

    #[tokio::test]
    async fn unreachable_service_falls_back() {
        let provider = HttpPredictionProvider::new(
            InferenceConfig::default()
                // Port 9 (discard) on localhost is not expected to be listening.
                .with_endpoint("http://127.0.0.1:9/models/demand")
                .with_timeout(Duration::from_millis(500))
                .with_credential(CredentialSource::fixed("hf_test")),
        )
        .unwrap();

        let prediction = provider.predict(&product(), &HISTORY).await;

        assert_eq!(prediction.value(), estimate(&HISTORY));
        assert!(prediction.is_fallback());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = HttpPredictionProvider::new(InferenceConfig::default().with_timeout(Duration::ZERO))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
