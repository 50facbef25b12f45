//! Entry optimization stage.
//!
//! Wraps the proposer oracle: shows it the full candidate list, the judge's
//! last verdict, and the fact base, and asks for a single rewritten entry
//! for the target position. Unlike the selection stage this one has no
//! fallback — a bad guessed rewrite could make things worse, so a failed
//! call or unparseable payload is returned as an error for the loop to
//! handle.

use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Candidate, FactBase, ProposedEntry, SelectionVerdict};
use crate::domain::ports::{ChatOracle, OracleRequest};
use crate::services::parsing::strip_code_fences;

const OPTIMIZER_SYSTEM_PROMPT: &str = "You are an expert at optimizing search result snippets \
    to maximize their selection by an LLM-based site selector. Always respond with valid JSON only.";

/// Optimization stage wrapping the proposer oracle.
pub struct SnippetOptimizer {
    oracle: Arc<dyn ChatOracle>,
    temperature: f32,
}

impl SnippetOptimizer {
    pub fn new(oracle: Arc<dyn ChatOracle>) -> Self {
        Self {
            oracle,
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Propose a replacement entry for the candidate at `target_position`.
    pub async fn propose(
        &self,
        query: &str,
        candidates: &[Candidate],
        target_position: usize,
        verdict: &SelectionVerdict,
        fact_base: &FactBase,
        debug_prompts: bool,
    ) -> DomainResult<ProposedEntry> {
        if target_position >= candidates.len() {
            return Err(DomainError::TargetOutOfBounds {
                position: target_position,
                len: candidates.len(),
            });
        }

        let prompt = optimization_prompt(
            query,
            &format_candidates(candidates),
            &format_selected(verdict),
            target_position,
            fact_base,
        );

        if debug_prompts {
            debug!(target: "serpsmith::optimizer", %prompt, "optimization prompt");
        }

        let request = OracleRequest::new(prompt)
            .with_system(OPTIMIZER_SYSTEM_PROMPT)
            .with_temperature(self.temperature);

        let raw = self.oracle.complete(request).await?;

        if debug_prompts {
            debug!(target: "serpsmith::optimizer", %raw, "raw proposer response");
        }

        let cleaned = strip_code_fences(&raw);
        let entry: ProposedEntry = serde_json::from_str(&cleaned)
            .map_err(|err| DomainError::MalformedOutput(format!("JSON parsing failed: {err}")))?;

        if entry.is_empty() {
            return Err(DomainError::MalformedOutput(
                "proposed entry carries no title, snippet, or link".to_string(),
            ));
        }
        Ok(entry)
    }
}

/// Format candidates with their 0-based positions visible, so the oracle
/// can reason about the target's slot. Error placeholders are skipped.
fn format_candidates(candidates: &[Candidate]) -> String {
    let mut formatted = String::new();
    for candidate in candidates {
        if candidate.is_error_placeholder() {
            continue;
        }
        formatted.push_str(&format!(
            "[{}] {}\n   URL: {}\n   Snippet: {}\n\n",
            candidate.position, candidate.title, candidate.link, candidate.snippet
        ));
    }
    formatted
}

fn format_selected(verdict: &SelectionVerdict) -> String {
    let mut formatted = String::new();
    for (rank, site) in verdict.selected.iter().enumerate() {
        formatted.push_str(&format!(
            "{}. {}\n   URL: {}\n   Confidence: {}/10\n   Reason: {}\n\n",
            rank + 1,
            site.title,
            site.url,
            site.confidence,
            site.reason
        ));
    }
    formatted
}

fn optimization_prompt(
    query: &str,
    formatted_candidates: &str,
    formatted_selected: &str,
    target_position: usize,
    fact_base: &FactBase,
) -> String {
    format!(
        r#"You are an expert at optimizing search result snippets to maximize their selection by an LLM-based site selector.

The following search was performed for: "{query}"

Here are the search results (including a special target entry at index {target_position}):

{formatted_candidates}
The site selector LLM was asked to select the most valuable sites. Here are the sites it selected and its reasoning:

{formatted_selected}
You may ONLY use information from the following fact file. All content you generate must be truthful and based on this file:

---
{facts}
---

Your task:
- Analyze why the target entry at index {target_position} was or was not selected.
- Propose a new version of the target entry (title, snippet, and link) that is more likely to be selected by the site selector LLM for this query.
- Make the snippet as relevant, authoritative, and appealing as possible for the query.
- Respond ONLY with a valid JSON object with keys: title, snippet, link, and a brief reason for your changes (reason_for_change).

Example response format:
{{
  "title": "...",
  "snippet": "...",
  "link": "...",
  "reason_for_change": "..."
}}"#,
        facts = fact_base.content()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::oracle::mock::ScriptedOracle;
    use crate::domain::models::SearchHit;

    fn candidates() -> Vec<Candidate> {
        Candidate::index_hits(vec![
            SearchHit::new("Planted Entry", "https://planted.example", "generic snippet"),
            SearchHit::new("Real A", "https://a.example", "snippet a"),
        ])
    }

    fn empty_verdict() -> SelectionVerdict {
        SelectionVerdict {
            selected: vec![],
            raw_response: None,
            success: true,
            error: None,
        }
    }

    #[tokio::test]
    async fn test_propose_parses_fenced_object() {
        let oracle = Arc::new(ScriptedOracle::new());
        oracle
            .push_text(
                "```json\n{\"title\": \"Better Title\", \"snippet\": \"Better snippet.\", \
                 \"link\": \"https://planted.example\", \"reason_for_change\": \"more specific\"}\n```",
            )
            .await;

        let optimizer = SnippetOptimizer::new(oracle);
        let entry = optimizer
            .propose(
                "query",
                &candidates(),
                0,
                &empty_verdict(),
                &FactBase::from_text("facts"),
                false,
            )
            .await
            .unwrap();

        assert_eq!(entry.title, "Better Title");
        assert_eq!(entry.reason_for_change, "more specific");
    }

    #[tokio::test]
    async fn test_propose_rejects_unparseable_payload() {
        let oracle = Arc::new(ScriptedOracle::new());
        oracle.push_text("Sure! Here's a better snippet: ...").await;

        let optimizer = SnippetOptimizer::new(oracle);
        let err = optimizer
            .propose(
                "query",
                &candidates(),
                0,
                &empty_verdict(),
                &FactBase::from_text("facts"),
                false,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_propose_propagates_oracle_failure() {
        let oracle = Arc::new(ScriptedOracle::new());
        oracle.push_failure("socket closed").await;

        let optimizer = SnippetOptimizer::new(oracle);
        let err = optimizer
            .propose(
                "query",
                &candidates(),
                0,
                &empty_verdict(),
                &FactBase::from_text("facts"),
                false,
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("socket closed"));
    }

    #[tokio::test]
    async fn test_propose_out_of_bounds_target() {
        let oracle = Arc::new(ScriptedOracle::new());
        let optimizer = SnippetOptimizer::new(oracle);

        let err = optimizer
            .propose(
                "query",
                &candidates(),
                9,
                &empty_verdict(),
                &FactBase::from_text("facts"),
                false,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::TargetOutOfBounds { .. }));
    }

    #[test]
    fn test_prompt_embeds_fact_base_and_target_index() {
        let prompt = optimization_prompt(
            "cloud AI in Europe",
            "[0] Planted Entry\n",
            "1. Real A\n",
            0,
            &FactBase::from_text("CloudAIQ is based in Berlin."),
        );

        assert!(prompt.contains("CloudAIQ is based in Berlin."));
        assert!(prompt.contains("target entry at index 0"));
        assert!(prompt.contains("reason_for_change"));
    }

    #[tokio::test]
    async fn test_schema_stable_across_identical_calls() {
        let oracle = Arc::new(ScriptedOracle::new());
        let reply = "{\"title\": \"T\", \"snippet\": \"S\", \"link\": \"https://l.example\", \
                     \"reason_for_change\": \"R\"}";
        oracle.push_text(reply).await;
        oracle.push_text(reply).await;

        let optimizer = SnippetOptimizer::new(oracle);
        let verdict = empty_verdict();
        let facts = FactBase::from_text("facts");

        let first = optimizer
            .propose("q", &candidates(), 0, &verdict, &facts, false)
            .await
            .unwrap();
        let second = optimizer
            .propose("q", &candidates(), 0, &verdict, &facts, false)
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
