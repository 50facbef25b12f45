//! Command handlers.

pub mod interactive;
pub mod optimize;
pub mod rewrite;
pub mod serve;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::oracle::{OpenAiConfig, OpenAiOracle};
use crate::adapters::search::{GoogleSearchConfig, GoogleSearchProvider};
use crate::domain::models::Config;
use crate::domain::ports::{ChatOracle, SearchProvider};
use crate::infrastructure::config::ConfigLoader;

/// Load configuration from the default hierarchy or an explicit file.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Build the production oracle from config.
pub fn build_oracle(config: &Config) -> Result<Arc<dyn ChatOracle>> {
    let oracle = OpenAiOracle::new(OpenAiConfig::from_settings(&config.oracle))
        .context("failed to initialize oracle")?;
    Ok(Arc::new(oracle))
}

/// Build the production search provider from config.
pub fn build_search_provider(config: &Config) -> Arc<dyn SearchProvider> {
    Arc::new(GoogleSearchProvider::new(GoogleSearchConfig::from_settings(
        &config.search,
    )))
}
