// Logging views and the builtin widget kinds
use crate::application::controller::{ModelFactory, ViewFactory, WidgetTypeRegistry, WidgetView};
use crate::domain::registry::DuplicateNameError;
use crate::domain::widget::{WidgetKind, WidgetModel, WidgetSeed};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Stand-in for the real render layer: consumes the model's batched
/// attribute-change notifications and logs them.
pub struct LogView {
    widget_name: String,
}

impl LogView {
    pub fn bind(model: Arc<WidgetModel>) -> Box<dyn WidgetView> {
        let widget_name = model.name().to_string();
        let mut changes = model.subscribe_changes();
        // Capture only the name: the receiver must not keep the model
        // alive, or this task would outlive the dashboard teardown.
        let name = widget_name.clone();
        drop(model);

        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(keys) => {
                        tracing::info!("widget {} attributes changed: {:?}", name, keys);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("widget {} missed {} change batches", name, skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Box::new(Self { widget_name })
    }
}

impl WidgetView for LogView {
    fn widget_name(&self) -> &str {
        &self.widget_name
    }
}

/// Registers the builtin widget kinds under the class names dashboard
/// configs refer to: `chart`, `lvalue` (last-value indicator) and the
/// static `text` widget, each paired with a logging view.
pub fn register_builtin(registry: &mut WidgetTypeRegistry) -> Result<(), DuplicateNameError> {
    let chart: ModelFactory = Arc::new(|mut seed: WidgetSeed| {
        seed.attributes.entry("domain").or_insert(json!([0, 0]));
        seed.attributes.entry("range").or_insert(json!([0, 0]));
        seed.attributes.entry("metrics").or_insert(json!([]));
        WidgetModel::new(seed, WidgetKind::Dynamic)
    });
    let lvalue: ModelFactory = Arc::new(|mut seed: WidgetSeed| {
        seed.attributes.entry("lvalue").or_insert(json!(null));
        WidgetModel::new(seed, WidgetKind::Dynamic)
    });
    let text: ModelFactory = Arc::new(|seed| WidgetModel::new(seed, WidgetKind::Static));

    registry.models.add("chart", chart)?;
    registry.models.add("lvalue", lvalue)?;
    registry.models.add("text", text)?;

    for view_class in ["ChartView", "LValueView", "TextView"] {
        let view: ViewFactory = Arc::new(LogView::bind);
        registry.views.add(view_class, view)?;
    }

    Ok(())
}
