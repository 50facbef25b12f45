//! Proposed rewrite of the target candidate.

use serde::{Deserialize, Serialize};

/// A single replacement entry proposed by the optimization stage.
///
/// Fields default to empty when the oracle omits them; applying an entry
/// with an empty field keeps the candidate's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub reason_for_change: String,
}

impl ProposedEntry {
    /// True when the proposal carries no usable content at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.snippet.is_empty() && self.link.is_empty()
    }
}
