//! External inference service adapter.
//!
//! Failures here are isolated: every path resolves to a prediction, falling
//! back to the local estimator when the service cannot be used.

pub mod http;

use std::time::Duration;

pub use http::HttpPredictionProvider;

/// Default inference endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models/facebook/bart-large";

/// Environment variable holding the bearer credential.
pub const DEFAULT_CREDENTIAL_VAR: &str = "HUGGING_FACE_API_KEY";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Where the inference credential comes from.
///
/// The credential is resolved on every call so it can be provisioned or
/// revoked while the process runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read the named environment variable at call time.
    Env(String),
    /// Fixed value (tests, embedding).
    Fixed(Option<String>),
}

impl CredentialSource {
    pub fn none() -> Self {
        Self::Fixed(None)
    }

    pub fn fixed(token: impl Into<String>) -> Self {
        Self::Fixed(Some(token.into()))
    }

    /// Current credential; blank values count as absent.
    pub fn resolve(&self) -> Option<String> {
        self.resolve_with(|var| std::env::var(var).ok())
    }

    /// Like [`resolve`](Self::resolve), reading `Env` sources through `lookup`.
    pub fn resolve_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = match self {
            CredentialSource::Env(var) => lookup(var),
            CredentialSource::Fixed(token) => token.clone(),
        };
        raw.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::Env(DEFAULT_CREDENTIAL_VAR.to_string())
    }
}

/// Connection settings for the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub endpoint: String,
    /// Upper bound on a single request, including reading the body.
    pub timeout: Duration,
    pub credential: CredentialSource,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            credential: CredentialSource::default(),
        }
    }
}

impl InferenceConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_credential(mut self, credential: CredentialSource) -> Self {
        self.credential = credential;
        self
    }
}
