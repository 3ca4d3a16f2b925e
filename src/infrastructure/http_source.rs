// HTTP snapshot source - GET /api/widgets/{dashboard}/{widget}/snapshot
use crate::application::snapshot::{SnapshotError, SnapshotSource};
use crate::infrastructure::config::ApiSettings;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

/// Fetches widget snapshots over HTTP. The request timeout defaults to the
/// dashboard's poll interval, so a hung request fails that tick instead of
/// never resolving; there is no retry.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    base_url: String,
    auth: Option<(String, String)>,
}

impl HttpSnapshotSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: None,
        })
    }

    /// Sends basic-auth credentials with every snapshot request.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    pub fn from_config(api: &ApiSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut source = Self::new(api.base_url.clone(), timeout)?;
        if let (Some(username), Some(password)) = (&api.username, &api.password) {
            source = source.with_basic_auth(username, password);
        }
        Ok(source)
    }

    fn snapshot_url(&self, dashboard_name: &str, widget_name: &str) -> String {
        format!(
            "{}/api/widgets/{}/{}/snapshot",
            self.base_url,
            urlencoding::encode(dashboard_name),
            urlencoding::encode(widget_name)
        )
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_snapshot(
        &self,
        dashboard_name: &str,
        widget_name: &str,
    ) -> Result<Map<String, Value>, SnapshotError> {
        let mut request = self
            .client
            .get(self.snapshot_url(dashboard_name, widget_name))
            .header("Accept", "application/json");
        if let Some((username, password)) = &self.auth {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SnapshotError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        match serde_json::from_str::<Value>(&body)? {
            Value::Object(map) => Ok(map),
            _ => Err(SnapshotError::NotAnObject),
        }
    }
}
