// Dashboard controller - assembles models and views from configuration
use crate::application::dashboard::DashboardModel;
use crate::application::snapshot::SnapshotSource;
use crate::domain::collection::WidgetCollection;
use crate::domain::registry::{DuplicateNameError, Registry};
use crate::domain::widget::{WidgetModel, WidgetSeed};
use crate::infrastructure::config::DashboardConfig;
use std::sync::Arc;
use thiserror::Error;

/// Builds a widget model from its seeded config fragment. The factory
/// decides the widget's kind and may fill in type-specific defaults.
pub type ModelFactory = Arc<dyn Fn(WidgetSeed) -> WidgetModel + Send + Sync>;

/// Builds the view paired with a model. Views subscribe to the model's
/// change notifications themselves; rendering is their business.
pub type ViewFactory = Arc<dyn Fn(Arc<WidgetModel>) -> Box<dyn WidgetView> + Send + Sync>;

/// Render-facing collaborator bound to one widget model.
pub trait WidgetView: Send {
    fn widget_name(&self) -> &str;
}

/// The process-wide widget type tables: configuration strings resolve here
/// to concrete model and view constructors. Every type named in a dashboard
/// config must be registered before assembly runs.
#[derive(Default)]
pub struct WidgetTypeRegistry {
    pub models: Registry<ModelFactory>,
    pub views: Registry<ViewFactory>,
}

impl WidgetTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("widget {kind} class '{name}' is not registered")]
    UnregisteredType { kind: &'static str, name: String },
    #[error("duplicate widget: {0}")]
    DuplicateWidget(#[from] DuplicateNameError),
    #[error("requestInterval must be greater than zero")]
    InvalidInterval,
}

/// Composition root for one dashboard: resolves each configured widget's
/// model and view classes through the registry, wires views to models, and
/// hands the assembled widget set to a `DashboardModel`.
pub struct DashboardController {
    dashboard: Arc<DashboardModel>,
    views: Vec<Box<dyn WidgetView>>,
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("dashboard", &self.dashboard.name())
            .field("widgets", &self.dashboard.widgets().len())
            .field("views", &self.views.len())
            .finish()
    }
}

impl DashboardController {
    /// Pure assembly: synchronous, no network I/O. Any unregistered type or
    /// duplicate widget name is fatal; no partial dashboard is built.
    pub fn from_config(
        config: DashboardConfig,
        registry: &WidgetTypeRegistry,
        source: Arc<dyn SnapshotSource>,
    ) -> Result<Self, AssemblyError> {
        if config.request_interval == 0 {
            return Err(AssemblyError::InvalidInterval);
        }
        // Read before the widget loop consumes `config.widgets`.
        let interval = config.interval();

        let mut widgets = WidgetCollection::new();
        let mut views = Vec::with_capacity(config.widgets.len());

        for entry in config.widgets {
            let make_model =
                registry
                    .models
                    .get(&entry.model_class)
                    .ok_or_else(|| AssemblyError::UnregisteredType {
                        kind: "model",
                        name: entry.model_class.clone(),
                    })?;
            let make_view =
                registry
                    .views
                    .get(&entry.view_class)
                    .ok_or_else(|| AssemblyError::UnregisteredType {
                        kind: "view",
                        name: entry.view_class.clone(),
                    })?;

            let model = Arc::new(make_model(entry.model.into_seed(&config.name)));
            views.push(make_view(Arc::clone(&model)));
            widgets.add(model)?;
        }

        let dashboard = Arc::new(DashboardModel::new(config.name, widgets, interval, source));
        Ok(Self { dashboard, views })
    }

    /// Bootstrap convenience, equivalent to `DashboardModel::poll`.
    pub fn start(&self) {
        self.dashboard.poll();
    }

    pub fn stop(&self) {
        self.dashboard.stop_polling();
    }

    pub fn dashboard(&self) -> &Arc<DashboardModel> {
        &self.dashboard
    }

    pub fn views(&self) -> &[Box<dyn WidgetView>] {
        &self.views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::snapshot::SnapshotError;
    use crate::domain::widget::WidgetKind;
    use async_trait::async_trait;
    use serde_json::{json, Map, Value};

    struct ToyView {
        widget_name: String,
    }

    impl WidgetView for ToyView {
        fn widget_name(&self) -> &str {
            &self.widget_name
        }
    }

    struct NoSource;

    #[async_trait]
    impl SnapshotSource for NoSource {
        async fn fetch_snapshot(
            &self,
            _dashboard_name: &str,
            _widget_name: &str,
        ) -> Result<Map<String, Value>, SnapshotError> {
            Err(SnapshotError::Status(410))
        }
    }

    fn toy_registry() -> WidgetTypeRegistry {
        let mut registry = WidgetTypeRegistry::new();

        let static_model: ModelFactory =
            Arc::new(|seed| WidgetModel::new(seed, WidgetKind::Static));
        let dynamic_model: ModelFactory =
            Arc::new(|seed| WidgetModel::new(seed, WidgetKind::Dynamic));
        registry.models.add("static_toy", static_model).unwrap();
        registry.models.add("dynamic_toy", dynamic_model).unwrap();

        let view: ViewFactory = Arc::new(|model| {
            Box::new(ToyView {
                widget_name: model.name().to_string(),
            })
        });
        registry.views.add("toy", view).unwrap();

        registry
    }

    fn config(document: Value) -> DashboardConfig {
        serde_json::from_value(document).unwrap()
    }

    fn fixture() -> DashboardConfig {
        config(json!({
            "name": "dashboard-1",
            "requestInterval": 50,
            "widgets": [
                {"modelClass": "static_toy", "viewClass": "toy",
                 "model": {"name": "widget-1"}},
                {"modelClass": "dynamic_toy", "viewClass": "toy",
                 "model": {"name": "widget-2", "stuff": "foo"}},
                {"modelClass": "dynamic_toy", "viewClass": "toy",
                 "model": {"name": "widget-4", "stuff": "bar"}}
            ]
        }))
    }

    #[test]
    fn assembles_models_and_views_from_config() {
        let controller =
            DashboardController::from_config(fixture(), &toy_registry(), Arc::new(NoSource))
                .unwrap();

        let dashboard = controller.dashboard();
        assert_eq!(dashboard.name(), "dashboard-1");
        assert_eq!(dashboard.request_interval().as_millis(), 50);
        assert_eq!(dashboard.widgets().len(), 3);

        let widget2 = dashboard.widgets().get("widget-2").unwrap();
        assert_eq!(widget2.dashboard_name(), "dashboard-1");
        assert_eq!(widget2.attr("stuff"), Some(json!("foo")));
        assert!(!widget2.is_static());
        assert!(dashboard.widgets().get("widget-1").unwrap().is_static());

        let view_names: Vec<_> = controller
            .views()
            .iter()
            .map(|v| v.widget_name().to_string())
            .collect();
        assert_eq!(view_names, ["widget-1", "widget-2", "widget-4"]);
    }

    #[test]
    fn unregistered_model_class_is_fatal() {
        let document = config(json!({
            "name": "dashboard-1",
            "widgets": [
                {"modelClass": "mystery", "viewClass": "toy",
                 "model": {"name": "widget-1"}}
            ]
        }));

        let err =
            DashboardController::from_config(document, &toy_registry(), Arc::new(NoSource))
                .unwrap_err();
        assert!(
            matches!(err, AssemblyError::UnregisteredType { kind: "model", ref name } if name == "mystery")
        );
    }

    #[test]
    fn unregistered_view_class_is_fatal() {
        let document = config(json!({
            "name": "dashboard-1",
            "widgets": [
                {"modelClass": "static_toy", "viewClass": "mystery",
                 "model": {"name": "widget-1"}}
            ]
        }));

        let err =
            DashboardController::from_config(document, &toy_registry(), Arc::new(NoSource))
                .unwrap_err();
        assert!(
            matches!(err, AssemblyError::UnregisteredType { kind: "view", ref name } if name == "mystery")
        );
    }

    #[test]
    fn duplicate_widget_names_are_fatal() {
        let document = config(json!({
            "name": "dashboard-1",
            "widgets": [
                {"modelClass": "static_toy", "viewClass": "toy",
                 "model": {"name": "widget-1"}},
                {"modelClass": "dynamic_toy", "viewClass": "toy",
                 "model": {"name": "widget-1"}}
            ]
        }));

        let err =
            DashboardController::from_config(document, &toy_registry(), Arc::new(NoSource))
                .unwrap_err();
        assert!(matches!(err, AssemblyError::DuplicateWidget(ref e) if e.name == "widget-1"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let document = config(json!({
            "name": "dashboard-1",
            "requestInterval": 0,
            "widgets": []
        }));

        let err =
            DashboardController::from_config(document, &toy_registry(), Arc::new(NoSource))
                .unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidInterval));
    }

    #[test]
    fn controllers_summarize_in_debug_output() {
        let controller =
            DashboardController::from_config(fixture(), &toy_registry(), Arc::new(NoSource))
                .unwrap();

        let rendered = format!("{controller:?}");
        assert!(rendered.contains("dashboard-1"));
        assert!(rendered.contains("widgets: 3"));
    }

    #[test]
    fn request_interval_defaults_to_ten_seconds() {
        let document = config(json!({"name": "dashboard-1", "widgets": []}));

        let controller =
            DashboardController::from_config(document, &toy_registry(), Arc::new(NoSource))
                .unwrap();
        assert_eq!(controller.dashboard().request_interval().as_millis(), 10_000);
    }
}
