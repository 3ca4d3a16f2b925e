// Dashboard polling and widget-registry engine
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::controller::{
    AssemblyError, DashboardController, ModelFactory, ViewFactory, WidgetTypeRegistry, WidgetView,
};
pub use application::dashboard::DashboardModel;
pub use application::snapshot::{SnapshotError, SnapshotSource};
pub use domain::collection::WidgetCollection;
pub use domain::registry::{DuplicateNameError, Registry};
pub use domain::widget::{ChangedKeys, WidgetKind, WidgetModel, WidgetSeed};
pub use infrastructure::config::{load_dashboard_config, load_source_config, DashboardConfig};
pub use infrastructure::http_source::HttpSnapshotSource;
