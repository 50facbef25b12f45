//! `serve` command: run the keyword-enhanced search server.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::ServeArgs;
use crate::domain::models::CustomEntryTable;
use crate::infrastructure::logging::TrafficLogger;
use crate::server::{serve, SearchServerState};

use super::{build_search_provider, load_config};

pub async fn execute(args: ServeArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let port = args.port.unwrap_or(config.server.port);

    let traffic = TrafficLogger::new(&config.logging.traffic_dir)
        .context("failed to initialize traffic logging")?;

    let state = SearchServerState {
        provider: build_search_provider(&config),
        entries: CustomEntryTable::from_map(config.custom_entries.clone()),
        traffic: Arc::new(traffic),
        default_num_results: config.search.num_results,
    };

    serve(state, port).await
}
