// Widget model - one widget's configuration and live state
use serde_json::{Map, Value};
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Whether a widget's data is fixed at render time or refreshed by polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Static,
    Dynamic,
}

/// Attribute keys whose values changed in one snapshot merge, batched.
pub type ChangedKeys = Vec<String>;

/// Construction input for a widget model: the per-widget config fragment
/// with the owning dashboard's name already injected.
#[derive(Debug, Clone)]
pub struct WidgetSeed {
    pub name: String,
    pub dashboard_name: String,
    pub title: String,
    pub attributes: Map<String, Value>,
}

/// One widget on a dashboard. The name is immutable after construction;
/// attributes are mutated only by snapshot merges (dynamic widgets) or
/// never (static widgets). Each model owns its attribute map exclusively,
/// so sibling widgets share no mutable state.
pub struct WidgetModel {
    name: String,
    dashboard_name: String,
    title: String,
    kind: WidgetKind,
    attributes: Mutex<Map<String, Value>>,
    changes: broadcast::Sender<ChangedKeys>,
}

impl WidgetModel {
    pub fn new(seed: WidgetSeed, kind: WidgetKind) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            name: seed.name,
            dashboard_name: seed.dashboard_name,
            title: seed.title,
            kind,
            attributes: Mutex::new(seed.attributes),
            changes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dashboard_name(&self) -> &str {
        &self.dashboard_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn is_static(&self) -> bool {
        self.kind == WidgetKind::Static
    }

    /// Clone-out read of a single attribute.
    pub fn attr(&self, key: &str) -> Option<Value> {
        self.attributes
            .lock()
            .expect("widget attribute lock poisoned")
            .get(key)
            .cloned()
    }

    /// Point-in-time copy of the whole attribute map.
    pub fn attributes(&self) -> Map<String, Value> {
        self.attributes
            .lock()
            .expect("widget attribute lock poisoned")
            .clone()
    }

    /// Merges a decoded snapshot into the attributes: matching keys are
    /// overwritten, others left untouched. Emits one batched change
    /// notification per call, covering only keys whose value actually
    /// changed, and only after the full merge completes. A merge that
    /// changes nothing emits nothing. Changed keys are reported in the
    /// snapshot's own key order.
    pub fn merge_snapshot(&self, snapshot: Map<String, Value>) -> ChangedKeys {
        let mut changed = Vec::new();
        {
            let mut attributes = self
                .attributes
                .lock()
                .expect("widget attribute lock poisoned");
            for (key, value) in snapshot {
                match attributes.get(&key) {
                    Some(existing) if *existing == value => {}
                    _ => {
                        changed.push(key.clone());
                        attributes.insert(key, value);
                    }
                }
            }
        }

        if !changed.is_empty() {
            // Nobody listening is fine; views come and go.
            let _ = self.changes.send(changed.clone());
        }
        changed
    }

    /// Render-facing interface: subscribers receive one `ChangedKeys` batch
    /// per successful merge.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<ChangedKeys> {
        self.changes.subscribe()
    }
}
