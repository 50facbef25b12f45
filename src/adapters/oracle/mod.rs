//! Chat oracle adapters.

pub mod mock;
pub mod openai;

pub use mock::ScriptedOracle;
pub use openai::{OpenAiConfig, OpenAiOracle};
