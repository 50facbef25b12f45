//! Handoff sink adapters.

pub mod channel;
pub mod file;

pub use channel::ChannelHandoff;
pub use file::FileHandoff;
