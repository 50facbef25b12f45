//! Property tests for the selection stage's fallback behavior.

use std::sync::Arc;

use proptest::prelude::*;

use serpsmith::adapters::oracle::ScriptedOracle;
use serpsmith::domain::models::{Candidate, SearchHit};
use serpsmith::SiteSelector;

fn arb_hit() -> impl Strategy<Value = SearchHit> {
    prop_oneof![
        ("[a-zA-Z ]{1,20}", "[a-z]{3,10}", "[a-zA-Z ]{0,40}").prop_map(
            |(title, host, snippet)| SearchHit::new(title, format!("https://{host}.example"), snippet)
        ),
        "[a-zA-Z ]{1,30}".prop_map(SearchHit::error),
    ]
}

proptest! {
    #[test]
    fn fallback_respects_bound_and_skips_error_placeholders(
        hits in prop::collection::vec(arb_hit(), 0..12),
        max_selected in 0_usize..6,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");

        let verdict = runtime.block_on(async {
            // An exhausted script makes every judge call fail, forcing the
            // deterministic fallback path.
            let oracle = Arc::new(ScriptedOracle::new());
            let selector = SiteSelector::new(oracle);
            let candidates = Candidate::index_hits(hits);
            selector.select("any query", &candidates, max_selected, false).await
        });

        prop_assert!(!verdict.success);
        prop_assert!(verdict.selected.len() <= max_selected);
        // Fallback picks real results only: every selected entry carries a
        // URL taken from a non-error candidate.
        for site in &verdict.selected {
            prop_assert!(site.url.starts_with("https://"));
            prop_assert!(!site.url.is_empty());
        }
    }

    #[test]
    fn fallback_selection_preserves_candidate_order(
        real_count in 1_usize..8,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");

        let verdict = runtime.block_on(async {
            let hits: Vec<SearchHit> = (0..real_count)
                .map(|i| SearchHit::new(format!("Site {i}"), format!("https://site{i}.example"), "s"))
                .collect();
            let oracle = Arc::new(ScriptedOracle::new());
            let selector = SiteSelector::new(oracle);
            selector.select("q", &Candidate::index_hits(hits), 3, false).await
        });

        let expected = real_count.min(3);
        prop_assert_eq!(verdict.selected.len(), expected);
        for (i, site) in verdict.selected.iter().enumerate() {
            prop_assert_eq!(&site.title, &format!("Site {i}"));
            prop_assert_eq!(site.original_index, i64::try_from(i).unwrap());
        }
    }
}
