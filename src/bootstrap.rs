//! Wiring shared by the server binary and the CLI.

use std::sync::Arc;

use anyhow::Context;
use courselib_db::LibraryStore;
use courselib_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry with the store module and every resource module registered against `store`.
pub fn build_registry(store: Arc<LibraryStore>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    registry
}

/// Build the registry over a fresh store and initialize every module.
pub async fn initialize(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let registry = build_registry(Arc::new(LibraryStore::new()));
    registry
        .init_all(&InitCtx { settings })
        .await
        .context("module initialization failed")?;
    Ok(registry)
}

/// Run the HTTP server until ctrl-c, driving the full module lifecycle.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    courselib_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "course-library bootstrap starting"
    );

    let registry = initialize(&settings).await?;
    let ctx = InitCtx {
        settings: &settings,
    };
    registry
        .start_all(&ctx)
        .await
        .context("module start-up failed")?;

    let served = courselib_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry.stop_all().await.context("module shutdown failed")?;
    served?;

    tracing::info!("course-library stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
