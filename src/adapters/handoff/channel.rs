//! Channel-backed handoff sink.
//!
//! Forwards delivered artifacts over an mpsc channel so tests can assert on
//! exactly what the loop handed off, without touching the filesystem.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{HandoffArtifact, HandoffSink};

/// Handoff sink that sends artifacts to a receiver.
pub struct ChannelHandoff {
    sender: mpsc::Sender<HandoffArtifact>,
}

impl ChannelHandoff {
    /// Create a sink and the receiving end for its artifacts.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<HandoffArtifact>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl HandoffSink for ChannelHandoff {
    async fn deliver(&self, artifact: &HandoffArtifact) -> DomainResult<()> {
        self.sender
            .send(artifact.clone())
            .await
            .map_err(|err| DomainError::HandoffFailed(format!("receiver dropped: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delivered_artifact_is_observable() {
        let (sink, mut receiver) = ChannelHandoff::new(1);
        let artifact = HandoffArtifact {
            query: "q".to_string(),
            snippet: "s".to_string(),
            round: 3,
        };

        sink.deliver(&artifact).await.unwrap();
        assert_eq!(receiver.recv().await, Some(artifact));
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_a_handoff_error() {
        let (sink, receiver) = ChannelHandoff::new(1);
        drop(receiver);

        let artifact = HandoffArtifact {
            query: "q".to_string(),
            snippet: "s".to_string(),
            round: 1,
        };
        assert!(sink.deliver(&artifact).await.is_err());
    }
}
