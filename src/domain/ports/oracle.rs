//! Chat oracle port.
//!
//! Both the judge (selection) and proposer (optimization) calls go through
//! this single-method seam: one synchronous request carrying a role-tagged
//! message pair, one text payload back. The payload is expected to be a
//! structured-data literal, optionally wrapped in a fenced code block that
//! callers must strip before parsing.

use async_trait::async_trait;

/// A single completion request: system instruction plus user prompt.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub system: Option<String>,
    pub user: String,
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,
}

impl OracleRequest {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
            temperature: 0.3,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Error types for oracle calls.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("oracle not configured: {0}")]
    NotConfigured(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("empty completion returned")]
    EmptyCompletion,
}

/// Port trait for LLM completion backends.
///
/// Implementations must be `Send + Sync`; each call is a single blocking
/// external request with the adapter's own per-call timeout. Callers never
/// retry inside a round.
#[async_trait]
pub trait ChatOracle: Send + Sync {
    /// Identifier for this oracle backend, e.g. "openai" or "scripted".
    fn oracle_id(&self) -> &str;

    /// Execute one completion request and return the raw text payload.
    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError>;
}
