//! `interactive` command: search REPL with judged selection.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;

use crate::cli::display;
use crate::domain::models::{Candidate, CustomEntryTable};
use crate::domain::ports::SearchProvider;
use crate::services::{enhance_results, SiteSelector};

use super::{build_oracle, build_search_provider, load_config};

pub async fn execute(config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let oracle = build_oracle(&config)?;
    let provider = build_search_provider(&config);
    let entries = CustomEntryTable::from_map(config.custom_entries.clone());
    let selector =
        SiteSelector::new(oracle).with_temperature(config.oracle.selector_temperature);

    println!(
        "{}",
        style("Intelligent search. Type a query, or /help for commands.").bold()
    );

    let stdin = std::io::stdin();
    let mut history: Vec<String> = Vec::new();

    loop {
        print!("{} ", style("search>").cyan().bold());
        std::io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" => break,
            "/help" => {
                println!("  /history  show past queries");
                println!("  /clear    clear query history");
                println!("  /help     this message");
                println!("  /quit     exit (also /exit)");
            }
            "/history" => {
                if history.is_empty() {
                    println!("{}", style("No queries yet.").dim());
                }
                for (i, query) in history.iter().enumerate() {
                    println!("  {}. {query}", i + 1);
                }
            }
            "/clear" => {
                history.clear();
                println!("{}", style("History cleared.").dim());
            }
            query => {
                history.push(query.to_string());

                let organic = provider.search(query, config.search.num_results).await;
                let enhanced = enhance_results(organic, query, &entries);
                let candidates = Candidate::index_hits(enhanced);

                println!("{}", display::candidates_table(&candidates));

                let verdict = selector
                    .select(query, &candidates, config.optimization.max_selected, false)
                    .await;
                println!("{}", display::render_verdict(&verdict));
            }
        }
    }

    println!("{}", style("Bye.").dim());
    Ok(())
}
