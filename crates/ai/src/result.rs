use thiserror::Error;

/// Why an external prediction was not used.
///
/// These never reach the caller of a provider as errors; they are carried in
/// [`Prediction::Fallback`] for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("no inference credential configured")]
    MissingCredential,

    #[error("network error: {0}")]
    Network(String),

    #[error("inference service returned status {0}")]
    Status(u16),

    #[error("inference request timed out")]
    Timeout,

    #[error("malformed inference response: {0}")]
    Malformed(String),
}

/// Outcome of one prediction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    /// Value returned by the external inference service.
    Model { value: u32 },

    /// Local estimate used because the external path was unavailable.
    Fallback { value: u32, reason: InferenceError },
}

impl Prediction {
    pub fn model(value: u32) -> Self {
        Self::Model { value }
    }

    pub fn fallback(value: u32, reason: InferenceError) -> Self {
        Self::Fallback { value, reason }
    }

    /// The predicted quantity, regardless of where it came from.
    pub fn value(&self) -> u32 {
        match self {
            Prediction::Model { value } | Prediction::Fallback { value, .. } => *value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Prediction::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&InferenceError> {
        match self {
            Prediction::Model { .. } => None,
            Prediction::Fallback { reason, .. } => Some(reason),
        }
    }
}
