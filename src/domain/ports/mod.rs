//! Port trait definitions (hexagonal architecture).
//!
//! Async trait interfaces that infrastructure adapters implement:
//! - `ChatOracle`: single-shot LLM completion calls (judge and proposer)
//! - `SearchProvider`: web-search collaborator
//! - `HandoffSink`: durable persistence + downstream trigger on convergence
//!
//! These are the seams that let every stage run against deterministic
//! doubles without any network dependency.

pub mod handoff;
pub mod oracle;
pub mod search;

pub use handoff::{HandoffArtifact, HandoffSink};
pub use oracle::{ChatOracle, OracleError, OracleRequest};
pub use search::SearchProvider;
