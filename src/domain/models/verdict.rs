//! Selection verdicts produced by the judge oracle.

use serde::{Deserialize, Serialize};

use crate::domain::models::candidate::Candidate;

/// One site the judge chose to investigate further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSite {
    pub url: String,
    pub title: String,
    /// Confidence score in 1..=10.
    pub confidence: u8,
    pub reason: String,
    pub expected_content: String,
    /// Position reference into the caller's candidate list, or -1 when the
    /// oracle could not anchor this entry to a position.
    pub original_index: i64,
    /// Occasionally the judge echoes a snippet for the site; kept when
    /// present because it is the preferred convergence artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SelectedSite {
    /// Triple-match rule: this entry matches the target candidate if its
    /// position reference equals the target's position, or its title
    /// string-equals the target's current title, or its url string-equals
    /// the target's current link. Evaluated in that priority order; any one
    /// match suffices. The three-way OR is deliberate because the judge's
    /// own indexing may drift from the caller's list after a rewrite.
    pub fn matches(&self, target: &Candidate) -> bool {
        if usize::try_from(self.original_index).is_ok_and(|i| i == target.position) {
            return true;
        }
        if !self.title.is_empty() && self.title == target.title {
            return true;
        }
        !self.url.is_empty() && self.url == target.link
    }
}

/// Canonical, normalized output of one selection round.
///
/// Always well-formed: a failed oracle call or unparseable payload is
/// signaled through `success`/`error` with a deterministic fallback in
/// `selected`, never through a panic or an `Err`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionVerdict {
    /// Ordered selections, highest-value first as ranked by the judge.
    pub selected: Vec<SelectedSite>,
    /// Raw oracle text, preserved for diagnostics.
    pub raw_response: Option<String>,
    pub success: bool,
    pub error: Option<String>,
}

impl SelectionVerdict {
    /// Find the verdict entry matching the target candidate, if any.
    pub fn matched_entry(&self, target: &Candidate) -> Option<&SelectedSite> {
        self.selected.iter().find(|site| site.matches(target))
    }
}
