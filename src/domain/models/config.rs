//! Main configuration structure for serpsmith.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::models::custom_entries::CustomEntry;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Oracle (LLM completion) configuration.
    #[serde(default)]
    pub oracle: OracleSettings,

    /// Web-search collaborator configuration.
    #[serde(default)]
    pub search: SearchSettings,

    /// Convergence loop configuration.
    #[serde(default)]
    pub optimization: OptimizationSettings,

    /// Handoff slot and downstream trigger configuration.
    #[serde(default)]
    pub handoff: HandoffSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Search server configuration.
    #[serde(default)]
    pub server: ServerSettings,

    /// Operator-defined custom entries, keyed by query keyword.
    #[serde(default)]
    pub custom_entries: HashMap<String, Vec<CustomEntry>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oracle: OracleSettings::default(),
            search: SearchSettings::default(),
            optimization: OptimizationSettings::default(),
            handoff: HandoffSettings::default(),
            logging: LoggingSettings::default(),
            server: ServerSettings::default(),
            custom_entries: HashMap::new(),
        }
    }
}

/// Oracle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OracleSettings {
    /// API base URL.
    #[serde(default = "default_oracle_base_url")]
    pub base_url: String,

    /// Model identifier for both judge and proposer calls.
    #[serde(default = "default_oracle_model")]
    pub model: String,

    /// Sampling temperature for the judge (selection) calls.
    #[serde(default = "default_selector_temperature")]
    pub selector_temperature: f32,

    /// Sampling temperature for the proposer (optimization) calls.
    #[serde(default = "default_optimizer_temperature")]
    pub optimizer_temperature: f32,

    /// Per-call timeout in seconds.
    #[serde(default = "default_oracle_timeout_secs")]
    pub timeout_secs: u64,

    /// API key (read from OPENAI_API_KEY env if not set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_oracle_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_oracle_model() -> String {
    "gpt-4o".to_string()
}

const fn default_selector_temperature() -> f32 {
    0.3
}

const fn default_optimizer_temperature() -> f32 {
    0.7
}

const fn default_oracle_timeout_secs() -> u64 {
    120
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            base_url: default_oracle_base_url(),
            model: default_oracle_model(),
            selector_temperature: default_selector_temperature(),
            optimizer_temperature: default_optimizer_temperature(),
            timeout_secs: default_oracle_timeout_secs(),
            api_key: None,
        }
    }
}

/// Web-search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchSettings {
    /// Search API endpoint.
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// Results to request per query (1-10).
    #[serde(default = "default_num_results")]
    pub num_results: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,

    /// API key (read from GOOGLE_API_KEY env if not set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Custom search engine id (read from GOOGLE_CSE_ID env if not set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cse_id: Option<String>,
}

fn default_search_base_url() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

const fn default_num_results() -> u32 {
    10
}

const fn default_search_timeout_secs() -> u64 {
    15
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            num_results: default_num_results(),
            timeout_secs: default_search_timeout_secs(),
            api_key: None,
            cse_id: None,
        }
    }
}

/// Convergence loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizationSettings {
    /// Maximum selection+optimization rounds before giving up.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Maximum sites the judge may select per round.
    #[serde(default = "default_max_selected")]
    pub max_selected: usize,

    /// Title substring identifying the target candidate.
    #[serde(default = "default_target_marker")]
    pub target_marker: String,

    /// Path to the fact base markdown file.
    #[serde(default = "default_fact_base_path")]
    pub fact_base_path: String,
}

const fn default_max_rounds() -> u32 {
    5
}

const fn default_max_selected() -> usize {
    3
}

fn default_target_marker() -> String {
    "Planted Entry".to_string()
}

fn default_fact_base_path() -> String {
    "company_info.md".to_string()
}

impl Default for OptimizationSettings {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            max_selected: default_max_selected(),
            target_marker: default_target_marker(),
            fact_base_path: default_fact_base_path(),
        }
    }
}

/// Handoff configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HandoffSettings {
    /// Durable slot the converged snippet is written to (overwritten each run).
    #[serde(default = "default_slot_path")]
    pub slot_path: String,

    /// Downstream command spawned fire-and-forget after a successful handoff.
    /// Empty means no downstream trigger.
    #[serde(default)]
    pub downstream_command: Vec<String>,
}

fn default_slot_path() -> String {
    "target_snippet.txt".to_string()
}

impl Default for HandoffSettings {
    fn default() -> Self {
        Self {
            slot_path: default_slot_path(),
            downstream_command: Vec::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for append-only protocol traffic streams.
    #[serde(default = "default_traffic_dir")]
    pub traffic_dir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_traffic_dir() -> String {
    "traffic_logs".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            traffic_dir: default_traffic_dir(),
        }
    }
}

/// Search server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerSettings {
    /// Port the search server listens on.
    #[serde(default = "default_server_port")]
    pub port: u16,
}

const fn default_server_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}
