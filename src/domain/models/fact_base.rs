//! Fact base constraining the optimizer's claims.

use std::path::Path;

use crate::domain::errors::{DomainError, DomainResult};

/// Immutable block of truthful source material, loaded once per loop
/// invocation. The optimization stage embeds it as the sole permissible
/// source of factual claims about the target candidate.
#[derive(Debug, Clone, Default)]
pub struct FactBase {
    content: String,
}

impl FactBase {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Load the fact base from a markdown file. A missing or unreadable
    /// file is surfaced to the operator rather than silently swallowed.
    pub fn load(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|err| DomainError::FactBaseUnavailable {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
