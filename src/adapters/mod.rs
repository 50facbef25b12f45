//! Infrastructure adapters for external systems.

pub mod handoff;
pub mod oracle;
pub mod search;
