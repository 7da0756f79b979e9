//! NightDriver Monitor - canvas monitoring client
//!
//! Keeps a reactive view of the canvases and features on a NightDriver server,
//! serves it as a web dashboard, and routes every user intent through a
//! single-writer store.

pub mod actions;
pub mod api;
pub mod config;
pub mod container;
pub mod dashboard;
pub mod effects;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod shell;
pub mod state;
pub mod store;

pub use config::{load_config, Config};
pub use error::{MonitorError, Result};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::{CanvasApi, NightDriverClient};
use crate::container::MonitorContainer;
use crate::effects::Effects;
use crate::engine::AutoRefresh;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::shell::AppShell;
use crate::state::MonitorState;
use crate::store::Store;

/// Run the monitor against the configured NightDriver server until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    let timeout = Duration::from_secs(config.server.request_timeout_seconds);
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new(timeout)?);
    let api: Arc<dyn CanvasApi> = Arc::new(NightDriverClient::new(&config.server.url, http));
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
        cancel_for_signal.cancel();
    });

    run_with_api(config, api, cancel).await
}

/// Run the monitor with the given server API until `cancel` fires
pub async fn run_with_api(
    config: Config,
    api: Arc<dyn CanvasApi>,
    cancel: CancellationToken,
) -> Result<()> {
    let _shell = AppShell::new(config.build.clone());

    let listener = if config.dashboard.enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.dashboard.port));
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            MonitorError::Dashboard(format!(
                "Failed to bind dashboard to port {}: {}",
                config.dashboard.port, e
            ))
        })?;
        tracing::info!("Dashboard listening on http://{}", addr);
        Some(listener)
    } else {
        tracing::info!("Dashboard disabled");
        None
    };

    let (store, actions) =
        Store::with_effects(MonitorState::with_auto_refresh(config.auto_refresh.enabled));
    let container = MonitorContainer::new(store.clone());

    let effects = Effects::new(api, store.clone());
    let cancel_for_effects = cancel.clone();
    let effects_handle = tokio::spawn(async move {
        effects.run(actions, cancel_for_effects).await;
    });

    let dashboard_handle = listener.map(|listener| {
        let router = dashboard::build_router(container);
        let cancel_for_dashboard = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    cancel_for_dashboard.cancelled().await;
                })
                .await
            {
                tracing::error!("Dashboard server failed: {}", e);
            }
            tracing::debug!("Dashboard stopped");
        })
    });

    tracing::info!(
        "Monitoring {} (auto-refresh {}, every {}s)",
        config.server.url,
        if config.auto_refresh.enabled { "on" } else { "off" },
        config.auto_refresh.interval_seconds
    );

    let engine = AutoRefresh::new(
        store,
        Duration::from_secs(config.auto_refresh.interval_seconds),
        cancel.clone(),
    );
    engine.run().await;

    if let Err(e) = effects_handle.await {
        tracing::error!("Effects task failed: {}", e);
    }
    if let Some(handle) = dashboard_handle {
        if let Err(e) = handle.await {
            tracing::error!("Dashboard task failed: {}", e);
        }
    }

    tracing::info!("Monitor stopped");
    Ok(())
}
