// Widget collection - keyed, insertion-ordered set of widget models
use crate::domain::registry::DuplicateNameError;
use crate::domain::widget::WidgetModel;
use std::collections::HashMap;
use std::sync::Arc;

/// Container for one dashboard's widgets, keyed by widget name. Lookup is
/// O(1) amortized; iteration follows insertion order.
#[derive(Default)]
pub struct WidgetCollection {
    members: Vec<Arc<WidgetModel>>,
    index: HashMap<String, usize>,
}

impl WidgetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a model; fails when a member already carries the same name,
    /// leaving the collection unchanged.
    pub fn add(&mut self, model: Arc<WidgetModel>) -> Result<(), DuplicateNameError> {
        let name = model.name().to_string();
        if self.index.contains_key(&name) {
            return Err(DuplicateNameError { name });
        }
        self.index.insert(name, self.members.len());
        self.members.push(model);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<WidgetModel>> {
        self.index.get(name).map(|&i| &self.members[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<WidgetModel>> {
        self.members.iter()
    }

    /// New ordered sequence of the members matching `predicate`; the
    /// collection itself is untouched.
    pub fn filter(&self, predicate: impl Fn(&WidgetModel) -> bool) -> Vec<Arc<WidgetModel>> {
        self.members
            .iter()
            .filter(|m| predicate(m))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::widget::{WidgetKind, WidgetSeed};
    use serde_json::Map;

    fn model(name: &str, kind: WidgetKind) -> Arc<WidgetModel> {
        Arc::new(WidgetModel::new(
            WidgetSeed {
                name: name.to_string(),
                dashboard_name: "dashboard-1".to_string(),
                title: name.to_string(),
                attributes: Map::new(),
            },
            kind,
        ))
    }

    #[test]
    fn members_are_retrievable_by_name() {
        let mut widgets = WidgetCollection::new();
        widgets.add(model("widget-1", WidgetKind::Static)).unwrap();
        widgets.add(model("widget-2", WidgetKind::Dynamic)).unwrap();

        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets.get("widget-2").map(|w| w.name()), Some("widget-2"));
        assert!(widgets.get("widget-9").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut widgets = WidgetCollection::new();
        widgets.add(model("widget-1", WidgetKind::Static)).unwrap();

        let err = widgets
            .add(model("widget-1", WidgetKind::Dynamic))
            .unwrap_err();
        assert_eq!(err.name, "widget-1");
        assert_eq!(widgets.len(), 1);
        assert!(widgets.get("widget-1").is_some_and(|w| w.is_static()));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut widgets = WidgetCollection::new();
        for name in ["widget-3", "widget-1", "widget-2"] {
            widgets.add(model(name, WidgetKind::Dynamic)).unwrap();
        }

        let names: Vec<_> = widgets.iter().map(|w| w.name().to_string()).collect();
        assert_eq!(names, ["widget-3", "widget-1", "widget-2"]);
    }

    #[test]
    fn filter_keeps_order_without_mutating() {
        let mut widgets = WidgetCollection::new();
        widgets.add(model("widget-1", WidgetKind::Static)).unwrap();
        widgets.add(model("widget-2", WidgetKind::Dynamic)).unwrap();
        widgets.add(model("widget-3", WidgetKind::Static)).unwrap();
        widgets.add(model("widget-4", WidgetKind::Dynamic)).unwrap();

        let dynamic = widgets.filter(|w| !w.is_static());
        let names: Vec<_> = dynamic.iter().map(|w| w.name().to_string()).collect();
        assert_eq!(names, ["widget-2", "widget-4"]);
        assert_eq!(widgets.len(), 4);
    }
}
