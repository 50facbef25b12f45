//! Tracing subscriber setup from the loaded logging settings.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::models::LoggingSettings;

/// Build the env filter: `RUST_LOG` wins, the configured level otherwise.
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber: stderr output, configured level and
/// format (`json` or `pretty`).
pub fn init_tracing(settings: &LoggingSettings) {
    let filter = build_env_filter(&settings.level);
    let registry = tracing_subscriber::registry().with(filter);

    if settings.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
