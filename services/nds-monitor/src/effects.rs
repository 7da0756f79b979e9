//! Effects: turns dispatched actions into server calls

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::actions::MonitorAction;
use crate::api::CanvasApi;
use crate::model::{Canvas, CanvasId};
use crate::state::PendingDeletion;
use crate::store::{ActionStream, Dispatched, Store};

/// Reacts to dispatched actions by calling the NightDriver server and
/// dispatching the results back into the store
pub struct Effects {
    api: Arc<dyn CanvasApi>,
    store: Store,
}

impl Effects {
    pub fn new(api: Arc<dyn CanvasApi>, store: Store) -> Self {
        Self { api, store }
    }

    /// Handle actions in dispatch order until the stream ends or `cancel` fires
    pub async fn run(&self, mut actions: ActionStream, cancel: CancellationToken) {
        loop {
            tokio::select! {
                next = actions.recv() => match next {
                    Some(dispatched) => self.handle(dispatched).await,
                    None => break,
                },
                _ = cancel.cancelled() => {
                    tracing::debug!("Effects loop cancelled");
                    break;
                }
            }
        }
    }

    pub async fn handle(&self, dispatched: Dispatched) {
        let Dispatched { action, previous } = dispatched;
        match action {
            MonitorAction::RefreshCanvases => self.refresh().await,
            MonitorAction::ActivateCanvases(canvases) => {
                self.set_running(&canvases, true).await;
            }
            MonitorAction::DeactivateCanvases(canvases) => {
                self.set_running(&canvases, false).await;
            }
            MonitorAction::ResolveDeletion { accepted: false } => {
                tracing::debug!("Deletion cancelled by user");
            }
            MonitorAction::ResolveDeletion { accepted: true } => match previous.pending_deletion {
                Some(PendingDeletion::Canvas(canvas)) => {
                    self.store.dispatch(MonitorAction::DeleteCanvas(canvas));
                }
                Some(PendingDeletion::Feature(model)) => {
                    self.store.dispatch(MonitorAction::DeleteFeature(model));
                }
                None => tracing::debug!("Deletion confirmed with nothing pending"),
            },
            MonitorAction::DeleteCanvas(canvas) => {
                tracing::info!("Deleting canvas {} '{}'", canvas.id, canvas.name);
                if let Err(e) = self.api.delete_canvas(canvas.id).await {
                    self.fail(format!("Failed to delete canvas '{}': {}", canvas.name, e));
                    self.store.dispatch(MonitorAction::RefreshCanvases);
                }
            }
            MonitorAction::DeleteFeature(model) => {
                tracing::info!(
                    "Deleting feature {} '{}' from canvas {}",
                    model.feature.id,
                    model.feature.friendly_name,
                    model.canvas.id
                );
                if let Err(e) = self
                    .api
                    .delete_feature(model.canvas.id, model.feature.id)
                    .await
                {
                    self.fail(format!(
                        "Failed to delete feature '{}': {}",
                        model.feature.friendly_name, e
                    ));
                    self.store.dispatch(MonitorAction::RefreshCanvases);
                }
            }
            _ => {}
        }
    }

    async fn refresh(&self) {
        match self.api.canvases().await {
            Ok(canvases) => self.store.dispatch(MonitorAction::CanvasesLoaded(canvases)),
            Err(e) => self.fail(format!("Unable to load canvases: {}", e)),
        }
    }

    async fn set_running(&self, canvases: &[Canvas], running: bool) {
        if canvases.is_empty() {
            return;
        }
        let ids: Vec<CanvasId> = canvases.iter().map(|c| c.id).collect();
        let result = if running {
            self.api.start_canvases(&ids).await
        } else {
            self.api.stop_canvases(&ids).await
        };
        if let Err(e) = result {
            let verb = if running { "start" } else { "stop" };
            self.fail(format!("Failed to {} canvases {:?}: {}", verb, ids, e));
        }
        self.store.dispatch(MonitorAction::RefreshCanvases);
    }

    fn fail(&self, message: String) {
        tracing::warn!("{}", message);
        self.store.dispatch(MonitorAction::ConnectionFailed(message));
    }
}
