//! Candidate selection stage.
//!
//! Wraps the judge oracle: formats the candidate list into an analysis
//! prompt, normalizes the oracle's JSON verdict into canonical
//! [`SelectedSite`] records, and falls back to a deterministic selection
//! when the call fails or the payload cannot be parsed. The stage is purely
//! functional given its inputs and never returns an error.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::models::{Candidate, SelectedSite, SelectionVerdict};
use crate::domain::ports::{ChatOracle, OracleRequest};
use crate::services::parsing::strip_code_fences;

const SELECTOR_SYSTEM_PROMPT: &str = "You are an expert web researcher and content curator. \
    Your task is to analyze search results and select the most valuable websites to visit \
    for deeper content extraction. Always respond with valid JSON only.";

const FALLBACK_REASON: &str = "Fallback selection due to oracle analysis failure";
const FALLBACK_CONFIDENCE: u8 = 7;

const DEFAULT_CONFIDENCE: u8 = 5;
const DEFAULT_REASON: &str = "No reason provided";
const DEFAULT_EXPECTED_CONTENT: &str = "General information";

/// Selection stage wrapping the judge oracle.
pub struct SiteSelector {
    oracle: Arc<dyn ChatOracle>,
    temperature: f32,
}

impl SiteSelector {
    pub fn new(oracle: Arc<dyn ChatOracle>) -> Self {
        Self {
            oracle,
            temperature: 0.3,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Ask the judge which candidates are worth investigating.
    ///
    /// Never fails: an oracle or parse failure yields the deterministic
    /// fallback selection with `success: false` and the raw oracle text
    /// preserved for diagnostics.
    pub async fn select(
        &self,
        query: &str,
        candidates: &[Candidate],
        max_selected: usize,
        debug_prompts: bool,
    ) -> SelectionVerdict {
        let formatted = format_candidates(candidates);
        let prompt = analysis_prompt(query, &formatted, max_selected);

        if debug_prompts {
            debug!(target: "serpsmith::selector", %prompt, "analysis prompt");
        }

        let request = OracleRequest::new(prompt)
            .with_system(SELECTOR_SYSTEM_PROMPT)
            .with_temperature(self.temperature);

        let raw = match self.oracle.complete(request).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(oracle = self.oracle.oracle_id(), %err, "judge call failed, using fallback selection");
                return SelectionVerdict {
                    selected: fallback_selection(candidates, max_selected),
                    raw_response: None,
                    success: false,
                    error: Some(format!("oracle call failed: {err}")),
                };
            }
        };

        if debug_prompts {
            debug!(target: "serpsmith::selector", %raw, "raw judge response");
        }

        match normalize_response(&raw) {
            Ok(selected) => SelectionVerdict {
                selected,
                raw_response: Some(raw),
                success: true,
                error: None,
            },
            Err(err) => {
                warn!(%err, "judge response not parseable, using fallback selection");
                SelectionVerdict {
                    selected: fallback_selection(candidates, max_selected),
                    raw_response: Some(raw),
                    success: false,
                    error: Some(err),
                }
            }
        }
    }
}

/// Format candidates into an enumerated block, skipping error placeholders.
fn format_candidates(candidates: &[Candidate]) -> String {
    let mut formatted = String::new();
    for (display_index, candidate) in candidates.iter().enumerate() {
        if candidate.is_error_placeholder() {
            continue;
        }
        formatted.push_str(&format!(
            "{}. {}\n   URL: {}\n   Snippet: {}\n\n",
            display_index + 1,
            candidate.title,
            candidate.link,
            candidate.snippet
        ));
    }
    formatted
}

fn analysis_prompt(query: &str, formatted_candidates: &str, max_selected: usize) -> String {
    format!(
        r#"You are an expert web researcher. I have performed a search for: "{query}"

Here are the search results I found:

{formatted_candidates}
Your task is to analyze these results and select the {max_selected} most valuable websites to visit for deeper content extraction.

Consider these criteria when evaluating each site:

1. **Relevance**: How well does the site match the search query?
2. **Authority**: Is this a reputable, authoritative source?
3. **Content Quality**: Does the snippet suggest high-quality, detailed content?
4. **Uniqueness**: Does this site offer unique information not found elsewhere?
5. **Recency**: Is the information likely to be up-to-date?
6. **Depth**: Does the site likely contain comprehensive information?

For each site you select, provide:
- A confidence score (1-10, where 10 is highest confidence)
- A brief reason why this site is valuable
- What specific information you expect to find

IMPORTANT: Respond ONLY with a valid JSON array. Do not include any other text, explanations, or markdown formatting.

Example response format:
[
  {{
    "url": "https://example.com",
    "title": "Site Title",
    "confidence": 8,
    "reason": "Brief explanation of why this site is valuable",
    "expected_content": "What specific information you expect to find",
    "original_index": 2
  }}
]

Only include sites with confidence score >= 6. Limit to maximum {max_selected} sites."#
    )
}

/// Parse and normalize the judge's raw text into selection records.
///
/// Entries without a `url` field are discarded; missing optional fields get
/// defaults; confidence is clamped into 1..=10. Every validated entry is
/// kept: the `max_selected` limit is a prompt instruction, not a hard cap,
/// and a judge that over-answers must not have entries silently dropped.
fn normalize_response(raw: &str) -> Result<Vec<SelectedSite>, String> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|err| format!("JSON parsing failed: {err}"))?;

    let Value::Array(items) = value else {
        return Err("oracle response is not a JSON array".to_string());
    };

    Ok(items.iter().filter_map(normalize_entry).collect())
}

fn normalize_entry(item: &Value) -> Option<SelectedSite> {
    let object = item.as_object()?;
    let url = object.get("url")?.as_str()?.to_string();

    let confidence = object
        .get("confidence")
        .and_then(Value::as_u64)
        .map_or(DEFAULT_CONFIDENCE, |c| c.clamp(1, 10) as u8);

    Some(SelectedSite {
        url,
        title: string_or(object.get("title"), "Unknown"),
        confidence,
        reason: string_or(object.get("reason"), DEFAULT_REASON),
        expected_content: string_or(object.get("expected_content"), DEFAULT_EXPECTED_CONTENT),
        original_index: object
            .get("original_index")
            .and_then(Value::as_i64)
            .unwrap_or(-1),
        snippet: object
            .get("snippet")
            .and_then(Value::as_str)
            .map(ToString::to_string),
    })
}

fn string_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Deterministic selection used when the judge cannot be consulted: the
/// first `max_selected` non-error candidates, each at fixed confidence.
fn fallback_selection(candidates: &[Candidate], max_selected: usize) -> Vec<SelectedSite> {
    candidates
        .iter()
        .filter(|candidate| !candidate.is_error_placeholder())
        .take(max_selected)
        .map(|candidate| SelectedSite {
            url: candidate.link.clone(),
            title: candidate.title.clone(),
            confidence: FALLBACK_CONFIDENCE,
            reason: FALLBACK_REASON.to_string(),
            expected_content: "General information about the topic".to_string(),
            original_index: i64::try_from(candidate.position).unwrap_or(-1),
            snippet: None,
        })
        .collect()
}
