//! Serpsmith: an LLM-judged convergence loop for planted search entries.
//!
//! A planted entry is injected into search results and iteratively rewritten
//! until a selector agent (the judge) picks it, then the winning snippet is
//! handed off to a downstream website-rewrite consumer.
//!
//! Layering follows hexagonal architecture: `domain` holds the models and
//! port traits, `services` the selection/optimization stages and the loop,
//! `adapters` the oracle/search/handoff implementations, `infrastructure`
//! configuration and traffic logging, and `server`/`cli` the outer surfaces.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod services;

pub use domain::models::{
    Candidate, Config, CustomEntry, CustomEntryTable, FactBase, LoopOutcome, LoopReport,
    ProposedEntry, RoundResult, SearchHit, SelectedSite, SelectionVerdict,
};
pub use domain::{DomainError, DomainResult};
pub use services::{LoopConfig, OptimizationLoop, SiteSelector, SnippetOptimizer};
