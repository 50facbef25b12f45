//! Google Custom Search provider.
//!
//! Any failure, missing configuration, transport errors, API rejections,
//! becomes a single error-placeholder hit so callers always get a result
//! list back.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::domain::models::{SearchHit, SearchSettings};
use crate::domain::ports::SearchProvider;

/// Google Custom Search configuration.
#[derive(Debug, Clone)]
pub struct GoogleSearchConfig {
    /// API endpoint.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// API key (read from GOOGLE_API_KEY env if not set).
    pub api_key: Option<String>,
    /// Custom search engine id (read from GOOGLE_CSE_ID env if not set).
    pub cse_id: Option<String>,
}

impl Default for GoogleSearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/customsearch/v1".to_string(),
            timeout_secs: 15,
            api_key: None,
            cse_id: None,
        }
    }
}

impl GoogleSearchConfig {
    /// Build from the loaded search settings.
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout_secs: settings.timeout_secs,
            api_key: settings.api_key.clone(),
            cse_id: settings.cse_id.clone(),
        }
    }

    fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
    }

    fn get_cse_id(&self) -> Option<String> {
        self.cse_id
            .clone()
            .or_else(|| std::env::var("GOOGLE_CSE_ID").ok())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Google Custom Search adapter.
pub struct GoogleSearchProvider {
    config: GoogleSearchConfig,
    client: Client,
}

impl GoogleSearchProvider {
    pub fn new(config: GoogleSearchConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    async fn fetch(&self, query: &str, num_results: u32) -> Result<Vec<SearchHit>, String> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| "GOOGLE_API_KEY missing".to_string())?;
        let cse_id = self
            .config
            .get_cse_id()
            .ok_or_else(|| "GOOGLE_CSE_ID missing".to_string())?;

        let num = num_results.min(10).to_string();
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("key", api_key.as_str()),
                ("cx", cse_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|err| format!("search request failed: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("search API error {status}: {body}"));
        }

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|err| format!("malformed search response: {err}"))?;

        Ok(result
            .items
            .into_iter()
            .map(|item| SearchHit::new(item.title, item.link, item.snippet))
            .collect())
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    fn provider_id(&self) -> &str {
        "google"
    }

    async fn search(&self, query: &str, num_results: u32) -> Vec<SearchHit> {
        match self.fetch(query, num_results).await {
            Ok(hits) => hits,
            Err(reason) => {
                warn!(query, %reason, "web search failed");
                vec![SearchHit::error(format!("Search error: {reason}"))]
            }
        }
    }
}
