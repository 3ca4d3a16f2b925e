// Main entry point - registry setup, dashboard assembly, polling
use dashpoll::infrastructure::config::{load_dashboard_config, load_source_config};
use dashpoll::presentation::views::register_builtin;
use dashpoll::{DashboardController, HttpSnapshotSource, WidgetTypeRegistry};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let source_config = load_source_config("config/api")?;
    let dashboard_config = load_dashboard_config("config/dashboard")?;

    // Register the builtin widget kinds
    let mut registry = WidgetTypeRegistry::new();
    register_builtin(&mut registry)?;

    // Snapshot transport; request timeout matches the poll interval
    let source = Arc::new(HttpSnapshotSource::from_config(
        &source_config.api,
        dashboard_config.interval(),
    )?);

    // Assemble and start polling
    let controller = DashboardController::from_config(dashboard_config, &registry, source)?;
    controller.start();
    tracing::info!(
        "dashboard {} polling every {:?}",
        controller.dashboard().name(),
        controller.dashboard().request_interval()
    );

    tokio::signal::ctrl_c().await?;
    controller.stop();

    Ok(())
}
