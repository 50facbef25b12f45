//! Durable slot handoff with an optional downstream trigger.
//!
//! Writes the converged snippet to the slot file (overwriting any previous
//! run's content), then spawns the configured downstream command detached.
//! Only the slot write can fail the delivery; a trigger that fails to spawn
//! is logged and forgotten.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::HandoffSettings;
use crate::domain::ports::{HandoffArtifact, HandoffSink};

/// File-backed handoff sink.
pub struct FileHandoff {
    slot_path: PathBuf,
    downstream_command: Vec<String>,
}

impl FileHandoff {
    pub fn new(slot_path: impl Into<PathBuf>) -> Self {
        Self {
            slot_path: slot_path.into(),
            downstream_command: Vec::new(),
        }
    }

    /// Build from the loaded handoff settings.
    pub fn from_settings(settings: &HandoffSettings) -> Self {
        Self {
            slot_path: PathBuf::from(&settings.slot_path),
            downstream_command: settings.downstream_command.clone(),
        }
    }

    pub fn with_downstream_command(mut self, command: Vec<String>) -> Self {
        self.downstream_command = command;
        self
    }

    fn trigger_downstream(&self) {
        let Some((program, args)) = self.downstream_command.split_first() else {
            return;
        };

        match tokio::process::Command::new(program).args(args).spawn() {
            Ok(_child) => {
                info!(%program, "downstream consumer triggered");
            }
            Err(err) => {
                error!(%program, %err, "failed to trigger downstream consumer");
            }
        }
    }
}

#[async_trait]
impl HandoffSink for FileHandoff {
    async fn deliver(&self, artifact: &HandoffArtifact) -> DomainResult<()> {
        tokio::fs::write(&self.slot_path, &artifact.snippet)
            .await
            .map_err(|err| {
                DomainError::HandoffFailed(format!(
                    "failed to write slot {}: {err}",
                    self.slot_path.display()
                ))
            })?;

        info!(
            slot = %self.slot_path.display(),
            round = artifact.round,
            "converged snippet persisted"
        );

        self.trigger_downstream();
        Ok(())
    }
}
