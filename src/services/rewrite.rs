//! Downstream content-rewrite planner.
//!
//! Consumes the handoff slot: given a site's current content and the target
//! snippet the loop converged on, asks the oracle for content changes that
//! would make the site's generated snippet match the target. The site
//! content is consumed as given text; extraction heuristics are the
//! caller's concern.

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{ChatOracle, OracleRequest};

/// Plans site content changes toward a target snippet.
pub struct RewritePlanner {
    oracle: Arc<dyn ChatOracle>,
}

impl RewritePlanner {
    pub fn new(oracle: Arc<dyn ChatOracle>) -> Self {
        Self { oracle }
    }

    /// Ask the oracle for a change plan. Returns the proposal as markdown.
    pub async fn plan(&self, site_content: &str, target_snippet: &str) -> DomainResult<String> {
        let request = OracleRequest::new(rewrite_prompt(site_content, target_snippet))
            .with_temperature(0.3);
        let proposal = self.oracle.complete(request).await?;
        Ok(proposal.trim().to_string())
    }
}

fn rewrite_prompt(site_content: &str, target_snippet: &str) -> String {
    format!(
        r#"You are an expert in SEO and web content optimization. Your task is to review a company's website content and propose content changes so that a search engine or an LLM will generate a snippet as close as possible to the provided target snippet.

Here is the current website content:
---
{site_content}
---

Here is the target snippet we want to be generated:
{target_snippet}

Please propose specific content changes to the website's title, meta description, and main content (such as the first paragraph or key sections) to maximize the chance that the target snippet is used. Do NOT output a new HTML file. Instead, provide:
- A list of suggested changes (e.g., "Update title to...", "Rewrite first paragraph as...")
- The improved content blocks (title, meta description, main content) as plain text
- A brief explanation of your changes"#
    )
}
