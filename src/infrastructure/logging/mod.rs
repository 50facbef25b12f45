//! Traffic logging and subscriber setup.

pub mod setup;
pub mod traffic;

pub use setup::init_tracing;
pub use traffic::{TrafficLogger, TrafficStats};
