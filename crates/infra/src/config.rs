//! Configuration loading and representation.
//!
//! Everything is read from environment variables with defaults suitable for a
//! local dashboard. `from_lookup` takes any key -> value function so tests do
//! not need to mutate the process environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::inference::{CredentialSource, DEFAULT_CREDENTIAL_VAR, DEFAULT_ENDPOINT, InferenceConfig};
use crate::refresh::RefreshConfig;
use crate::simulation::InsightBasis;

pub const ENV_INFERENCE_URL: &str = "STOCKSENSE_INFERENCE_URL";
pub const ENV_INFERENCE_TIMEOUT_MS: &str = "STOCKSENSE_INFERENCE_TIMEOUT_MS";
pub const ENV_REFRESH_INTERVAL_MS: &str = "STOCKSENSE_REFRESH_INTERVAL_MS";
pub const ENV_SEED: &str = "STOCKSENSE_SEED";
pub const ENV_INSIGHT_BASIS: &str = "STOCKSENSE_INSIGHT_BASIS";
pub const ENV_BIND_ADDR: &str = "STOCKSENSE_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub inference: InferenceConfig,
    pub refresh: RefreshConfig,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let inference = InferenceConfig {
            endpoint: get(ENV_INFERENCE_URL).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: match get(ENV_INFERENCE_TIMEOUT_MS) {
                Some(raw) => positive_millis(ENV_INFERENCE_TIMEOUT_MS, &raw)?,
                None => InferenceConfig::default().timeout,
            },
            // Read at call time, not here.
            credential: CredentialSource::Env(DEFAULT_CREDENTIAL_VAR.to_string()),
        };

        let defaults = RefreshConfig::default();
        let refresh = RefreshConfig {
            interval: match get(ENV_REFRESH_INTERVAL_MS) {
                Some(raw) => positive_millis(ENV_REFRESH_INTERVAL_MS, &raw)?,
                None => defaults.interval,
            },
            seed: get(ENV_SEED)
                .map(|raw| parse::<u64>(ENV_SEED, &raw))
                .transpose()?,
            insight_basis: get(ENV_INSIGHT_BASIS)
                .map(|raw| parse::<InsightBasis>(ENV_INSIGHT_BASIS, &raw))
                .transpose()?
                .unwrap_or(defaults.insight_basis),
        };

        let bind_addr = parse::<SocketAddr>(
            ENV_BIND_ADDR,
            &get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        Ok(Self {
            inference,
            refresh,
            bind_addr,
        })
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ConfigError::invalid(key, raw, e.to_string()))
}

fn positive_millis(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    match parse::<u64>(key, raw)? {
        0 => Err(ConfigError::invalid(key, raw, "must be greater than zero")),
        ms => Ok(Duration::from_millis(ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.inference.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.inference.timeout, Duration::from_secs(3));
        assert_eq!(cfg.refresh.interval, Duration::from_millis(5000));
        assert_eq!(cfg.refresh.seed, None);
        assert_eq!(cfg.refresh.insight_basis, InsightBasis::Previous);
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(
            cfg.inference.credential,
            CredentialSource::Env("HUGGING_FACE_API_KEY".to_string())
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            (ENV_INFERENCE_URL, "http://localhost:9000/predict"),
            (ENV_INFERENCE_TIMEOUT_MS, "750"),
            (ENV_REFRESH_INTERVAL_MS, "15000"),
            (ENV_SEED, "42"),
            (ENV_INSIGHT_BASIS, "baseline"),
            (ENV_BIND_ADDR, "127.0.0.1:3000"),
        ])
        .unwrap();

        assert_eq!(cfg.inference.endpoint, "http://localhost:9000/predict");
        assert_eq!(cfg.inference.timeout, Duration::from_millis(750));
        assert_eq!(cfg.refresh.interval, Duration::from_secs(15));
        assert_eq!(cfg.refresh.seed, Some(42));
        assert_eq!(cfg.refresh.insight_basis, InsightBasis::Baseline);
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = config(&[(ENV_REFRESH_INTERVAL_MS, "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == ENV_REFRESH_INTERVAL_MS));
    }

    #[test]
    fn garbage_values_are_rejected() {
        assert!(config(&[(ENV_SEED, "abc")]).is_err());
        assert!(config(&[(ENV_INSIGHT_BASIS, "derived")]).is_err());
        assert!(config(&[(ENV_INFERENCE_TIMEOUT_MS, "-5")]).is_err());
        assert!(config(&[(ENV_BIND_ADDR, "not-an-addr")]).is_err());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[(ENV_REFRESH_INTERVAL_MS, "  ")]).unwrap();
        assert_eq!(cfg.refresh.interval, Duration::from_millis(5000));
    }
}
