//! Convergence handoff port.
//!
//! On convergence the loop delivers the extracted artifact through this
//! seam. The production sink persists to a durable slot and triggers the
//! downstream consumer fire-and-forget; a channel-backed sink makes the
//! handoff observable in tests without process-spawning side effects.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Artifact handed off to the downstream content-rewrite consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffArtifact {
    /// Query the loop converged on.
    pub query: String,
    /// Extracted snippet text to persist.
    pub snippet: String,
    /// Round in which convergence occurred.
    pub round: u32,
}

/// Port trait for handoff sinks.
#[async_trait]
pub trait HandoffSink: Send + Sync {
    /// Persist the artifact and signal the downstream consumer.
    ///
    /// A downstream trigger failure must not be reported here; only a
    /// failure to persist the artifact itself is an error.
    async fn deliver(&self, artifact: &HandoffArtifact) -> DomainResult<()>;
}
