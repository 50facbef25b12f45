//! `optimize` command: run the convergence loop end to end.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::handoff::FileHandoff;
use crate::cli::display;
use crate::cli::OptimizeArgs;
use crate::domain::models::{Candidate, CustomEntryTable, FactBase};
use crate::domain::ports::SearchProvider;
use crate::services::{enhance_results, LoopConfig, OptimizationLoop, SiteSelector, SnippetOptimizer};

use super::{build_oracle, build_search_provider, load_config};

pub async fn execute(args: OptimizeArgs, config_path: Option<&str>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(max_rounds) = args.max_rounds {
        config.optimization.max_rounds = max_rounds;
    }
    if let Some(fact_base) = &args.fact_base {
        config.optimization.fact_base_path.clone_from(fact_base);
    }

    let fact_base = FactBase::load(&config.optimization.fact_base_path).with_context(|| {
        format!(
            "fact base {} is required for optimization",
            config.optimization.fact_base_path
        )
    })?;

    let oracle = build_oracle(&config)?;
    let provider = build_search_provider(&config);
    let entries = CustomEntryTable::from_map(config.custom_entries.clone());

    info!(query = %args.query, "searching");
    let organic = provider.search(&args.query, config.search.num_results).await;
    let enhanced = enhance_results(organic, &args.query, &entries);
    let candidates = Candidate::index_hits(enhanced);

    println!("{}", display::candidates_table(&candidates));

    let selector = SiteSelector::new(Arc::clone(&oracle))
        .with_temperature(config.oracle.selector_temperature);
    let optimizer = SnippetOptimizer::new(Arc::clone(&oracle))
        .with_temperature(config.oracle.optimizer_temperature);
    let handoff = Arc::new(FileHandoff::from_settings(&config.handoff));

    let loop_config = LoopConfig {
        max_rounds: config.optimization.max_rounds,
        max_selected: config.optimization.max_selected,
        target_marker: config.optimization.target_marker.clone(),
        debug: args.debug_prompts,
    };
    let optimization = OptimizationLoop::new(selector, optimizer, handoff, loop_config);

    let report = optimization.run(&args.query, candidates, &fact_base).await;
    println!("{}", display::render_report(&report));

    Ok(())
}
