// Snapshot source trait - the seam between polling and transport
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A single widget's fetch went wrong. Always local to that widget for
/// that tick; the poll loop keeps running and the widget stays stale
/// until the next successful fetch.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("snapshot request returned status {0}")]
    Status(u16),
    #[error("snapshot body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot body is not a JSON object")]
    NotAnObject,
}

/// Reads one widget's current snapshot. Carries all request context
/// (base URL, credentials, timeout) explicitly; there is no process-wide
/// configuration behind it.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Exactly one read per call, no internal retry. Calls for different
    /// widgets are independent and may be in flight concurrently.
    async fn fetch_snapshot(
        &self,
        dashboard_name: &str,
        widget_name: &str,
    ) -> Result<Map<String, Value>, SnapshotError>;
}
