//! Search-result enhancement.
//!
//! Prepends operator-defined custom entries ahead of organic results,
//! matched by keyword against the query. Pure function of its inputs; the
//! entry table is injected by the caller, never ambient.

use tracing::debug;

use crate::domain::models::{CustomEntry, CustomEntryTable, SearchHit};

/// Prepend custom entries for this query ahead of the organic results.
///
/// When no keyword matches, one generic placeholder entry is prepended
/// instead so downstream stages always see at least one injected entry.
pub fn enhance_results(
    organic: Vec<SearchHit>,
    query: &str,
    table: &CustomEntryTable,
) -> Vec<SearchHit> {
    let mut custom = table.matching_entries(query);
    if custom.is_empty() {
        custom.push(placeholder_entry(query));
    }

    debug!(
        query,
        organic = organic.len(),
        custom = custom.len(),
        "enhancing search results"
    );

    let mut enhanced: Vec<SearchHit> = custom.iter().map(CustomEntry::to_hit).collect();
    enhanced.extend(organic);
    enhanced
}

/// Generic injected entry used when no configured keyword matches.
fn placeholder_entry(query: &str) -> CustomEntry {
    CustomEntry::new(
        "Enhanced Search Result",
        "https://example.com/enhanced-search",
        format!(
            "This is an enhanced search result for '{query}'. \
             Custom entries can be configured based on keywords."
        ),
    )
}
