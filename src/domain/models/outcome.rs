//! Terminal and per-round records of the convergence loop.

use serde::{Deserialize, Serialize};

use crate::domain::models::proposal::ProposedEntry;
use crate::domain::models::verdict::{SelectedSite, SelectionVerdict};

/// Result of one selection+optimization cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResult {
    /// 1-based round number.
    pub round: u32,
    pub verdict: SelectionVerdict,
    pub converged: bool,
    /// The rewrite applied after this round, when the round did not converge.
    pub proposed: Option<ProposedEntry>,
}

/// Terminal state of a loop run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoopOutcome {
    /// The target candidate was selected by the judge.
    Converged {
        round: u32,
        /// The verdict entry that matched the target.
        matched: SelectedSite,
        /// Snippet text persisted to the handoff slot.
        artifact: String,
    },
    /// The round bound was reached without a match.
    Exhausted { rounds: u32 },
    /// The optimization stage failed outright.
    Aborted { round: u32, reason: String },
}

impl LoopOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Operator-facing one-line summary, distinguishing "gave up after N
    /// rounds" from "optimizer failed outright".
    pub fn summary(&self) -> String {
        match self {
            Self::Converged { round, .. } => {
                format!("target entry selected in round {round}")
            }
            Self::Exhausted { rounds } => {
                format!("gave up after {rounds} rounds without selection")
            }
            Self::Aborted { round, reason } => {
                format!("optimizer failed outright in round {round}: {reason}")
            }
        }
    }
}

/// Full report of a loop run: terminal outcome plus per-round history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopReport {
    pub outcome: LoopOutcome,
    pub rounds: Vec<RoundResult>,
}
