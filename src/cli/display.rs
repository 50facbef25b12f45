//! Terminal rendering for verdicts, candidates, and loop reports.

use comfy_table::{presets, Cell, ContentArrangement, Table};
use console::style;

use crate::domain::models::{Candidate, LoopOutcome, LoopReport, SelectionVerdict};

/// Render the candidate list as a table.
pub fn candidates_table(candidates: &[Candidate]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "URL", "Snippet"]);

    for candidate in candidates {
        if candidate.is_error_placeholder() {
            table.add_row(vec![
                Cell::new(candidate.position),
                Cell::new("(error)"),
                Cell::new(""),
                Cell::new(candidate.error.as_deref().unwrap_or("")),
            ]);
        } else {
            table.add_row(vec![
                Cell::new(candidate.position),
                Cell::new(truncate(&candidate.title, 40)),
                Cell::new(truncate(&candidate.link, 50)),
                Cell::new(truncate(&candidate.snippet, 60)),
            ]);
        }
    }
    table
}

/// Render a selection verdict as a table plus reason lines.
pub fn render_verdict(verdict: &SelectionVerdict) -> String {
    if verdict.selected.is_empty() {
        return format!("{}", style("No sites selected.").dim());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Title", "URL", "Confidence", "Index"]);

    for (rank, site) in verdict.selected.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(truncate(&site.title, 40)),
            Cell::new(truncate(&site.url, 50)),
            Cell::new(format!("{}/10", site.confidence)),
            Cell::new(site.original_index),
        ]);
    }

    let mut output = table.to_string();
    for site in &verdict.selected {
        output.push_str(&format!(
            "\n  {} {}",
            style("reason:").dim(),
            truncate(&site.reason, 120)
        ));
    }
    if !verdict.success {
        if let Some(error) = &verdict.error {
            output.push_str(&format!(
                "\n{} {error}",
                style("judge analysis failed, fallback used:").yellow()
            ));
        }
    }
    output
}

/// Render the full loop report, one line per round plus the outcome.
pub fn render_report(report: &LoopReport) -> String {
    let mut output = String::new();

    for round in &report.rounds {
        let status = if round.converged {
            style("selected").green().to_string()
        } else {
            style("rejected").yellow().to_string()
        };
        output.push_str(&format!(
            "round {}: {} ({} sites picked)\n",
            round.round,
            status,
            round.verdict.selected.len()
        ));
        if let Some(entry) = &round.proposed {
            output.push_str(&format!(
                "  rewrite: {} - {}\n",
                truncate(&entry.title, 60),
                truncate(&entry.reason_for_change, 80)
            ));
        }
    }

    let summary = report.outcome.summary();
    let styled = match &report.outcome {
        LoopOutcome::Converged { artifact, .. } => {
            format!(
                "{} {summary}\n{}\n{artifact}",
                style("✓").green().bold(),
                style("converged snippet:").bold()
            )
        }
        LoopOutcome::Exhausted { .. } => format!("{} {summary}", style("✗").yellow().bold()),
        LoopOutcome::Aborted { .. } => format!("{} {summary}", style("✗").red().bold()),
    };
    output.push_str(&styled);
    output
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{prefix}…")
    }
}
