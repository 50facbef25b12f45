//! Operator-configured custom entries keyed by query keyword.
//!
//! The table is an explicit, injected configuration owned by the caller of
//! the search collaborator; keyword lookup is a pure function with no
//! ambient state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::models::candidate::SearchHit;

/// One operator-defined entry injected ahead of organic results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEntry {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl CustomEntry {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }

    pub fn to_hit(&self) -> SearchHit {
        SearchHit::new(&self.title, &self.link, &self.snippet)
    }
}

/// Keyword-to-entries lookup table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomEntryTable {
    entries: HashMap<String, Vec<CustomEntry>>,
}

impl CustomEntryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(entries: HashMap<String, Vec<CustomEntry>>) -> Self {
        Self { entries }
    }

    /// Register an entry under a keyword. Keywords are stored lowercase.
    pub fn insert(&mut self, keyword: impl Into<String>, entry: CustomEntry) {
        self.entries
            .entry(keyword.into().to_lowercase())
            .or_default()
            .push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries across all keywords.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// All registered keywords, sorted.
    pub fn keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = self.entries.keys().cloned().collect();
        keywords.sort();
        keywords
    }

    /// All entries whose keyword occurs as a case-insensitive substring of
    /// the query. Pure function of the table and the query; order follows
    /// keyword order sorted for determinism.
    pub fn matching_entries(&self, query: &str) -> Vec<CustomEntry> {
        let query_lower = query.to_lowercase();
        let mut keywords: Vec<&String> = self
            .entries
            .keys()
            .filter(|keyword| query_lower.contains(keyword.as_str()))
            .collect();
        keywords.sort();

        keywords
            .into_iter()
            .flat_map(|keyword| self.entries[keyword].iter().cloned())
            .collect()
    }
}
