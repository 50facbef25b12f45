//! Search-result candidates under consideration by the selector.

use serde::{Deserialize, Serialize};

use crate::domain::models::proposal::ProposedEntry;

/// One raw search-result-shaped record as returned by a search provider.
///
/// A hit with `error` set is a placeholder carrying a provider failure
/// instead of a real result; downstream stages must skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    /// Provider failure message, if this hit is an error placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchHit {
    /// Create a regular search hit.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            error: None,
        }
    }

    /// Create an error placeholder hit.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            link: String::new(),
            snippet: String::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A candidate in the optimization loop's working list.
///
/// `position` is assigned once at list construction and is the only stable
/// identity used for matching across rounds. Title, link, and snippet are
/// rewritten in place for the target candidate only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable 0-based index into the original list.
    pub position: usize,
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Carried over from the originating hit, if it was an error placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Candidate {
    /// Build the working candidate list, assigning each hit its permanent
    /// position. This is the only place positions are assigned.
    pub fn index_hits(hits: Vec<SearchHit>) -> Vec<Self> {
        hits.into_iter()
            .enumerate()
            .map(|(position, hit)| Self {
                position,
                title: hit.title,
                link: hit.link,
                snippet: hit.snippet,
                error: hit.error,
            })
            .collect()
    }

    pub fn is_error_placeholder(&self) -> bool {
        self.error.is_some()
    }

    /// Overwrite this candidate's visible fields from a proposed rewrite.
    ///
    /// Empty proposed fields keep the current value, so a partial proposal
    /// never blanks out the entry. The position is untouched.
    pub fn apply_rewrite(&mut self, entry: &ProposedEntry) {
        if !entry.title.is_empty() {
            self.title = entry.title.clone();
        }
        if !entry.snippet.is_empty() {
            self.snippet = entry.snippet.clone();
        }
        if !entry.link.is_empty() {
            self.link = entry.link.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_hits_assigns_sequential_positions() {
        let hits = vec![
            SearchHit::new("A", "https://a.example", "a"),
            SearchHit::error("boom"),
            SearchHit::new("B", "https://b.example", "b"),
        ];

        let candidates = Candidate::index_hits(hits);

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].position, 0);
        assert_eq!(candidates[2].position, 2);
        assert!(candidates[1].is_error_placeholder());
        assert!(!candidates[2].is_error_placeholder());
    }

    #[test]
    fn test_apply_rewrite_keeps_position_and_nonempty_fields() {
        let mut candidate = Candidate {
            position: 4,
            title: "Old title".to_string(),
            link: "https://old.example".to_string(),
            snippet: "Old snippet".to_string(),
            error: None,
        };

        let entry = ProposedEntry {
            title: "New title".to_string(),
            snippet: String::new(),
            link: "https://new.example".to_string(),
            reason_for_change: "test".to_string(),
        };

        candidate.apply_rewrite(&entry);

        assert_eq!(candidate.position, 4);
        assert_eq!(candidate.title, "New title");
        assert_eq!(candidate.link, "https://new.example");
        // Empty proposed snippet keeps the current one.
        assert_eq!(candidate.snippet, "Old snippet");
    }
}
