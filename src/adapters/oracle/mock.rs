//! Scripted oracle for testing.
//!
//! Replays a queue of canned replies, recording every request it receives,
//! so stages and the loop can run deterministically without any network
//! dependency.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{ChatOracle, OracleError, OracleRequest};

/// One scripted reply.
#[derive(Debug, Clone)]
enum ScriptedReply {
    Text(String),
    /// Simulated transport failure with the given message.
    Failure(String),
}

/// Deterministic oracle double.
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful text reply.
    pub async fn push_text(&self, text: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(ScriptedReply::Text(text.into()));
    }

    /// Queue a simulated transport failure.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(ScriptedReply::Failure(message.into()));
    }

    /// Number of completion calls received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// All requests received so far, in call order.
    pub async fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for ScriptedOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatOracle for ScriptedOracle {
    fn oracle_id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError> {
        self.requests.lock().await.push(request);

        match self.replies.lock().await.pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure(message)) => Err(OracleError::Network(message)),
            None => Err(OracleError::Network(
                "no scripted reply remaining".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_are_consumed_in_order() {
        let oracle = ScriptedOracle::new();
        oracle.push_text("first").await;
        oracle.push_failure("down").await;

        assert_eq!(
            oracle.complete(OracleRequest::new("a")).await.unwrap(),
            "first"
        );
        let err = oracle.complete(OracleRequest::new("b")).await.unwrap_err();
        assert!(err.to_string().contains("down"));
        assert_eq!(oracle.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let oracle = ScriptedOracle::new();
        assert!(oracle.complete(OracleRequest::new("a")).await.is_err());
    }
}
