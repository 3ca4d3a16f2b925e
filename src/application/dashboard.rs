// Dashboard model - owns the widget set and drives the poll loop
use crate::application::snapshot::SnapshotSource;
use crate::domain::collection::WidgetCollection;
use crate::domain::widget::WidgetModel;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// One dashboard's widgets plus the polling state machine: `Idle` until
/// `poll()`, `Polling` while the loop task runs, back to `Idle` after
/// `stop_polling()`. At most one poll task exists per instance.
pub struct DashboardModel {
    name: String,
    widgets: WidgetCollection,
    request_interval: Duration,
    // Computed once; widgets are not added or removed while polling.
    dynamic: Vec<Arc<WidgetModel>>,
    source: Arc<dyn SnapshotSource>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardModel {
    pub fn new(
        name: impl Into<String>,
        widgets: WidgetCollection,
        request_interval: Duration,
        source: Arc<dyn SnapshotSource>,
    ) -> Self {
        let dynamic = widgets.filter(|w| !w.is_static());
        Self {
            name: name.into(),
            widgets,
            request_interval,
            dynamic,
            source,
            poll_task: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn widgets(&self) -> &WidgetCollection {
        &self.widgets
    }

    pub fn request_interval(&self) -> Duration {
        self.request_interval
    }

    /// The precomputed dynamic subset; static widgets are never fetched.
    pub fn dynamic_widgets(&self) -> &[Arc<WidgetModel>] {
        &self.dynamic
    }

    /// Triggers one snapshot fetch per dynamic widget and returns without
    /// waiting for any of them. Each widget's success or failure is its
    /// own: a failed fetch is logged, the merge is skipped, and siblings
    /// and the poll schedule are unaffected.
    pub fn fetch_snapshots(&self) {
        for widget in &self.dynamic {
            let widget = Arc::clone(widget);
            let source = Arc::clone(&self.source);
            tokio::spawn(async move {
                match source
                    .fetch_snapshot(widget.dashboard_name(), widget.name())
                    .await
                {
                    Ok(snapshot) => {
                        widget.merge_snapshot(snapshot);
                    }
                    Err(err) => {
                        tracing::warn!(
                            "snapshot fetch failed for widget {} on {}: {}",
                            widget.name(),
                            widget.dashboard_name(),
                            err
                        );
                    }
                }
            });
        }
    }

    /// Starts polling: the first fetch fires with zero delay so data is
    /// visible without waiting a full interval, then every
    /// `request_interval` thereafter. Calling this while already polling
    /// is safe; the existing task is cancelled first so at most one timer
    /// is ever pending.
    pub fn poll(self: &Arc<Self>) {
        let mut slot = self.poll_task.lock().expect("poll task lock poisoned");
        if let Some(existing) = slot.take() {
            existing.abort();
        }

        let model = Arc::clone(self);
        *slot = Some(tokio::spawn(async move {
            let mut ticks = tokio::time::interval(model.request_interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately.
                ticks.tick().await;
                model.fetch_snapshots();
            }
        }));

        tracing::debug!(
            "dashboard {} polling every {:?}",
            self.name,
            self.request_interval
        );
    }

    /// Cancels the poll task if one exists; a no-op when already idle.
    /// Fetches already in flight are left to finish, and a late successful
    /// merge still applies. Merges are idempotent and only touch the
    /// owning widget's state, so that is stale but harmless.
    pub fn stop_polling(&self) {
        let task = self.poll_task.lock().expect("poll task lock poisoned").take();
        if let Some(task) = task {
            task.abort();
            tracing::debug!("dashboard {} polling stopped", self.name);
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll_task
            .lock()
            .expect("poll task lock poisoned")
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}
