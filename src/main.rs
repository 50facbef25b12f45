//! Serpsmith CLI entry point.

use clap::Parser;

use serpsmith::cli::{commands, handle_error, Cli, Commands};
use serpsmith::infrastructure::logging::init_tracing;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // A config that fails to load gets default logging here; the command's
    // own load reports the error once the subscriber is up.
    let logging = commands::load_config(config_path)
        .map(|config| config.logging)
        .unwrap_or_default();
    init_tracing(&logging);

    let result = match cli.command {
        Commands::Optimize(args) => commands::optimize::execute(args, config_path).await,
        Commands::Interactive => commands::interactive::execute(config_path).await,
        Commands::Serve(args) => commands::serve::execute(args, config_path).await,
        Commands::Rewrite(args) => commands::rewrite::execute(args, config_path).await,
    };

    if let Err(err) = result {
        handle_error(err);
    }
}
