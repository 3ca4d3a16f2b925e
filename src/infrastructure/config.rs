// Configuration documents and loaders
use crate::domain::widget::WidgetSeed;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

pub const DEFAULT_REQUEST_INTERVAL_MS: u64 = 10_000;

fn default_request_interval() -> u64 {
    DEFAULT_REQUEST_INTERVAL_MS
}

/// One dashboard's declarative document. Field aliases accept the wire
/// format's camelCase spelling alongside snake_case config files.
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub name: String,
    #[serde(default = "default_request_interval", alias = "requestInterval")]
    pub request_interval: u64,
    #[serde(default)]
    pub widgets: Vec<WidgetEntry>,
}

impl DashboardConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.request_interval)
    }
}

/// One widget entry: which registered model/view classes to instantiate,
/// and the model's own config fragment.
#[derive(Debug, Deserialize, Clone)]
pub struct WidgetEntry {
    #[serde(alias = "modelClass")]
    pub model_class: String,
    #[serde(alias = "viewClass")]
    pub view_class: String,
    pub model: WidgetEntryModel,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetEntryModel {
    pub name: String,
    pub title: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl WidgetEntryModel {
    /// Injects the owning dashboard's name; the title falls back to the
    /// widget name when not configured.
    pub fn into_seed(self, dashboard_name: &str) -> WidgetSeed {
        WidgetSeed {
            title: self.title.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            dashboard_name: dashboard_name.to_string(),
            attributes: self.attributes,
        }
    }
}

/// Where snapshots come from: base URL plus optional basic-auth
/// credentials for the metrics API.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub api: ApiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub fn load_dashboard_config(name: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_source_config(name: &str) -> anyhow::Result<SourceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name))
        .build()?;

    Ok(settings.try_deserialize()?)
}
