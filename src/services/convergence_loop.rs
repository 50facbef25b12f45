//! The convergence loop.
//!
//! Drives bounded rounds alternating selection and optimization until the
//! target candidate is selected by the judge, the round bound is exhausted,
//! or the optimizer fails outright. Rounds are strictly sequential: each
//! optimization call depends on the previous verdict, and each selection
//! call depends on the previous rewrite.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::models::{
    Candidate, FactBase, LoopOutcome, LoopReport, RoundResult, SelectedSite,
};
use crate::domain::ports::{HandoffArtifact, HandoffSink};
use crate::services::optimizer::SnippetOptimizer;
use crate::services::selector::SiteSelector;

/// Loop parameters.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Round bound; the sole safeguard against unbounded execution.
    pub max_rounds: u32,
    /// Maximum sites the judge may select per round.
    pub max_selected: usize,
    /// Title substring identifying the target candidate at init.
    pub target_marker: String,
    /// Log prompts and raw oracle responses.
    pub debug: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            max_selected: 3,
            target_marker: "Planted Entry".to_string(),
            debug: false,
        }
    }
}

/// State machine driving the selection/optimization rounds.
///
/// Terminal states are returned as a [`LoopOutcome`]; the loop never raises
/// past its own boundary.
pub struct OptimizationLoop {
    selector: SiteSelector,
    optimizer: SnippetOptimizer,
    handoff: Arc<dyn HandoffSink>,
    config: LoopConfig,
}

impl OptimizationLoop {
    pub fn new(
        selector: SiteSelector,
        optimizer: SnippetOptimizer,
        handoff: Arc<dyn HandoffSink>,
        config: LoopConfig,
    ) -> Self {
        Self {
            selector,
            optimizer,
            handoff,
            config,
        }
    }

    /// Resolve the target position by scanning titles for the configured
    /// marker substring, defaulting to position 0 when none matches.
    pub fn resolve_target(&self, candidates: &[Candidate]) -> usize {
        candidates
            .iter()
            .find(|candidate| candidate.title.contains(&self.config.target_marker))
            .map_or(0, |candidate| candidate.position)
    }

    /// Run the loop to a terminal state.
    ///
    /// The target position is resolved once here, before the first round.
    /// The candidate list is caller-owned input; the only mutation performed
    /// is the in-place rewrite of the target candidate between rounds.
    pub async fn run(
        &self,
        query: &str,
        mut candidates: Vec<Candidate>,
        fact_base: &FactBase,
    ) -> LoopReport {
        let mut rounds = Vec::new();

        if candidates.is_empty() {
            return LoopReport {
                outcome: LoopOutcome::Aborted {
                    round: 0,
                    reason: "candidate list is empty".to_string(),
                },
                rounds,
            };
        }

        let target_position = self.resolve_target(&candidates);

        for round in 1..=self.config.max_rounds {
            info!(round, query, "selection round starting");

            let verdict = self
                .selector
                .select(query, &candidates, self.config.max_selected, self.config.debug)
                .await;

            if let Some(site) = verdict.matched_entry(&candidates[target_position]).cloned() {
                info!(round, url = %site.url, "target entry selected, loop converged");
                let artifact = extract_artifact(&site, &candidates[target_position]);

                rounds.push(RoundResult {
                    round,
                    verdict,
                    converged: true,
                    proposed: None,
                });

                // Persist and signal downstream; a handoff failure is
                // surfaced to the operator but does not change the
                // terminal status.
                let handoff = HandoffArtifact {
                    query: query.to_string(),
                    snippet: artifact.clone(),
                    round,
                };
                if let Err(err) = self.handoff.deliver(&handoff).await {
                    error!(%err, "handoff delivery failed");
                }

                return LoopReport {
                    outcome: LoopOutcome::Converged {
                        round,
                        matched: site,
                        artifact,
                    },
                    rounds,
                };
            }

            info!(round, "target entry not selected, optimizing");

            match self
                .optimizer
                .propose(
                    query,
                    &candidates,
                    target_position,
                    &verdict,
                    fact_base,
                    self.config.debug,
                )
                .await
            {
                Ok(entry) => {
                    info!(round, title = %entry.title, "applying proposed rewrite");
                    candidates[target_position].apply_rewrite(&entry);
                    rounds.push(RoundResult {
                        round,
                        verdict,
                        converged: false,
                        proposed: Some(entry),
                    });
                }
                Err(err) => {
                    error!(round, %err, "optimization stage failed, aborting");
                    rounds.push(RoundResult {
                        round,
                        verdict,
                        converged: false,
                        proposed: None,
                    });
                    return LoopReport {
                        outcome: LoopOutcome::Aborted {
                            round,
                            reason: err.to_string(),
                        },
                        rounds,
                    };
                }
            }
        }

        info!(rounds = self.config.max_rounds, "round bound reached without selection");
        LoopReport {
            outcome: LoopOutcome::Exhausted {
                rounds: self.config.max_rounds,
            },
            rounds,
        }
    }
}

/// Artifact extraction priority: the verdict entry's snippet, then its
/// expected-content description, then the target candidate's own current
/// snippet.
fn extract_artifact(site: &SelectedSite, target: &Candidate) -> String {
    if let Some(snippet) = site.snippet.as_deref() {
        if !snippet.is_empty() {
            return snippet.to_string();
        }
    }
    if !site.expected_content.is_empty() {
        return site.expected_content.clone();
    }
    target.snippet.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SearchHit;

    fn target() -> Candidate {
        Candidate::index_hits(vec![SearchHit::new(
            "Planted Entry",
            "https://planted.example",
            "own snippet",
        )])
        .remove(0)
    }

    fn site(snippet: Option<&str>, expected: &str) -> SelectedSite {
        SelectedSite {
            url: "https://planted.example".to_string(),
            title: "Planted Entry".to_string(),
            confidence: 8,
            reason: "r".to_string(),
            expected_content: expected.to_string(),
            original_index: 0,
            snippet: snippet.map(ToString::to_string),
        }
    }

    #[test]
    fn test_artifact_prefers_verdict_snippet() {
        assert_eq!(
            extract_artifact(&site(Some("verdict snippet"), "expected"), &target()),
            "verdict snippet"
        );
    }

    #[test]
    fn test_artifact_falls_back_to_expected_content() {
        assert_eq!(
            extract_artifact(&site(None, "expected content"), &target()),
            "expected content"
        );
        assert_eq!(
            extract_artifact(&site(Some(""), "expected content"), &target()),
            "expected content"
        );
    }

    #[test]
    fn test_artifact_falls_back_to_target_snippet() {
        assert_eq!(extract_artifact(&site(None, ""), &target()), "own snippet");
    }
}
