//! `rewrite` command: plan site content changes toward the converged snippet.

use anyhow::{Context, Result};
use console::style;

use crate::cli::RewriteArgs;
use crate::services::RewritePlanner;

use super::{build_oracle, load_config};

pub async fn execute(args: RewriteArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;

    let snippet_path = args
        .snippet
        .unwrap_or_else(|| config.handoff.slot_path.clone());
    let target_snippet = std::fs::read_to_string(&snippet_path)
        .with_context(|| format!("failed to read target snippet from {snippet_path}"))?;
    let site_content = std::fs::read_to_string(&args.site_content)
        .with_context(|| format!("failed to read site content from {}", args.site_content))?;

    let planner = RewritePlanner::new(build_oracle(&config)?);
    let plan = planner
        .plan(&site_content, target_snippet.trim())
        .await
        .context("rewrite planning failed")?;

    let document = format!(
        "# Proposed Website Changes\n\n## Target snippet\n\n{}\n\n## Suggested changes\n\n{plan}\n",
        target_snippet.trim()
    );
    std::fs::write(&args.output, document)
        .with_context(|| format!("failed to write {}", args.output))?;

    println!(
        "{} proposed changes written to {}",
        style("✓").green().bold(),
        args.output
    );
    Ok(())
}
