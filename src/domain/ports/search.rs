//! Web-search collaborator port.

use async_trait::async_trait;

use crate::domain::models::SearchHit;

/// Port trait for search backends.
///
/// The contract is infallible at the signature level: provider failures are
/// returned as a single error placeholder hit rather than an `Err`, so the
/// caller always receives an ordered list it can enhance and index.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Identifier for this provider, e.g. "google" or "static".
    fn provider_id(&self) -> &str;

    /// Perform a web search and return ordered results.
    async fn search(&self, query: &str, num_results: u32) -> Vec<SearchHit>;
}
