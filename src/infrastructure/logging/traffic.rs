//! Protocol traffic logging for the search server.
//!
//! Records every request, response, tool invocation, and error as JSON
//! lines in per-kind append-only streams, with running counters for the
//! stats endpoint. Logging is best-effort: a stream that cannot be written
//! never fails the request being served.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

/// One record in a traffic stream.
#[derive(Debug, Clone, Serialize)]
struct TrafficRecord {
    timestamp: DateTime<Utc>,
    kind: String,
    correlation_id: String,
    data: Value,
}

/// Snapshot of traffic counters.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficStats {
    pub requests: u64,
    pub responses: u64,
    pub tool_calls: u64,
    pub errors: u64,
    pub log_directory: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only traffic logger with per-kind streams.
pub struct TrafficLogger {
    dir: PathBuf,
    requests: AtomicU64,
    responses: AtomicU64,
    tool_calls: AtomicU64,
    errors: AtomicU64,
}

impl TrafficLogger {
    /// Create a logger writing under the given directory.
    ///
    /// Creates the directory if it doesn't exist; existing streams are
    /// appended to, never truncated.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create traffic log directory {}", dir.display()))?;

        Ok(Self {
            dir,
            requests: AtomicU64::new(0),
            responses: AtomicU64::new(0),
            tool_calls: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        })
    }

    pub fn log_request(&self, correlation_id: &str, data: Value) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.append("requests.jsonl", "request", correlation_id, data);
    }

    pub fn log_response(&self, correlation_id: &str, data: Value) {
        self.responses.fetch_add(1, Ordering::Relaxed);
        self.append("responses.jsonl", "response", correlation_id, data);
    }

    pub fn log_tool_call(&self, correlation_id: &str, tool: &str, arguments: Value, result: Value) {
        self.tool_calls.fetch_add(1, Ordering::Relaxed);
        self.append(
            "tool_calls.jsonl",
            "tool_call",
            correlation_id,
            json!({
                "tool": tool,
                "arguments": arguments,
                "result": result,
            }),
        );
    }

    pub fn log_error(&self, correlation_id: &str, message: &str, data: Value) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        self.append(
            "errors.jsonl",
            "error",
            correlation_id,
            json!({
                "message": message,
                "detail": data,
            }),
        );
    }

    /// Current counter values.
    pub fn stats(&self) -> TrafficStats {
        TrafficStats {
            requests: self.requests.load(Ordering::Relaxed),
            responses: self.responses.load(Ordering::Relaxed),
            tool_calls: self.tool_calls.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            log_directory: self.dir.display().to_string(),
            timestamp: Utc::now(),
        }
    }

    fn append(&self, stream: &str, kind: &str, correlation_id: &str, data: Value) {
        let record = TrafficRecord {
            timestamp: Utc::now(),
            kind: kind.to_string(),
            correlation_id: correlation_id.to_string(),
            data,
        };

        if let Err(err) = self.write_record(&self.dir.join(stream), &record) {
            warn!(stream, %err, "failed to append traffic record");
        }
    }

    fn write_record(&self, path: &Path, record: &TrafficRecord) -> Result<()> {
        let json = serde_json::to_string(record).context("failed to serialize traffic record")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open traffic stream {}", path.display()))?;
        writeln!(file, "{json}").context("failed to write traffic record")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streams_are_separated_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let logger = TrafficLogger::new(dir.path()).unwrap();

        logger.log_request("id-1", json!({"query": "rust"}));
        logger.log_response("id-1", json!({"count": 3}));
        logger.log_tool_call("id-1", "search_web", json!({"query": "rust"}), json!([]));
        logger.log_error("id-2", "bad request", json!({}));

        for stream in ["requests", "responses", "tool_calls", "errors"] {
            let content =
                std::fs::read_to_string(dir.path().join(format!("{stream}.jsonl"))).unwrap();
            assert_eq!(content.lines().count(), 1, "{stream} should have one record");
        }
    }

    #[test]
    fn test_records_are_appended_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let logger = TrafficLogger::new(dir.path()).unwrap();

        logger.log_request("a", json!({}));
        logger.log_request("b", json!({}));

        let content = std::fs::read_to_string(dir.path().join("requests.jsonl")).unwrap();
        assert_eq!(content.lines().count(), 2);

        let first: Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(first["correlation_id"], "a");
        assert_eq!(first["kind"], "request");
    }

    #[test]
    fn test_stats_reflect_counters() {
        let dir = tempfile::tempdir().unwrap();
        let logger = TrafficLogger::new(dir.path()).unwrap();

        logger.log_request("a", json!({}));
        logger.log_request("b", json!({}));
        logger.log_error("c", "boom", json!({}));

        let stats = logger.stats();
        assert_eq!(stats.requests, 2);
        assert_eq!(stats.responses, 0);
        assert_eq!(stats.errors, 1);
    }
}
