//! Fixed-result search provider for tests and offline demos.

use async_trait::async_trait;

use crate::domain::models::SearchHit;
use crate::domain::ports::SearchProvider;

/// Search provider that returns a fixed hit list regardless of query.
pub struct StaticSearchProvider {
    hits: Vec<SearchHit>,
}

impl StaticSearchProvider {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self { hits }
    }

    /// Provider with no results at all.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    fn provider_id(&self) -> &str {
        "static"
    }

    async fn search(&self, _query: &str, num_results: u32) -> Vec<SearchHit> {
        self.hits
            .iter()
            .take(num_results as usize)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_respects_num_results() {
        let provider = StaticSearchProvider::new(vec![
            SearchHit::new("A", "https://a.example", "a"),
            SearchHit::new("B", "https://b.example", "b"),
            SearchHit::new("C", "https://c.example", "c"),
        ]);

        let hits = provider.search("anything", 2).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].title, "B");
    }
}
