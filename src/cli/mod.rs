//! Command-line interface.

pub mod commands;
pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "serpsmith")]
#[command(about = "LLM-judged search snippet optimization loop", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Load configuration from a specific file instead of .serpsmith/
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full optimization loop for a query
    Optimize(OptimizeArgs),

    /// Interactive search REPL with judged selection
    Interactive,

    /// Run the keyword-enhanced search server
    Serve(ServeArgs),

    /// Plan website content changes toward the converged snippet
    Rewrite(RewriteArgs),
}

#[derive(clap::Args)]
pub struct OptimizeArgs {
    /// Search query to optimize for
    pub query: String,

    /// Override the configured round bound
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// Override the configured fact base path
    #[arg(long)]
    pub fact_base: Option<String>,

    /// Log full prompts and raw oracle responses
    #[arg(long)]
    pub debug_prompts: bool,
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(clap::Args)]
pub struct RewriteArgs {
    /// File holding the website content to rework
    pub site_content: String,

    /// Snippet file to target (defaults to the configured handoff slot)
    #[arg(long)]
    pub snippet: Option<String>,

    /// Where to write the proposed changes
    #[arg(long, default_value = "proposed_website_changes.md")]
    pub output: String,
}

/// Print a fatal error and exit non-zero.
pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {err:#}", console::style("error:").red().bold());
    std::process::exit(1);
}
