//! Domain layer for the serpsmith optimization system.
//!
//! Contains the core data model, the port traits infrastructure adapters
//! implement, and domain-level error types.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
