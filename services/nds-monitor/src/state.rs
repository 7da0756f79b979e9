//! Monitor state, the reducer that applies actions to it, and its selectors

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::actions::MonitorAction;
use crate::model::{Canvas, CanvasFeature, CanvasId};

/// The monitoring data source could not be reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionError {
    pub message: String,
    pub since_epoch_ms: u64,
}

/// A deletion waiting for the user's confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingDeletion {
    Canvas(Canvas),
    Feature(CanvasFeature),
}

/// Everything the monitor knows about the server
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorState {
    pub canvases: Vec<Canvas>,
    pub auto_refresh: bool,
    pub connection_error: Option<ConnectionError>,
    pub pending_deletion: Option<PendingDeletion>,
    pub loading: bool,
    pub last_refresh_epoch_ms: Option<u64>,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self {
            canvases: Vec::new(),
            auto_refresh: true,
            connection_error: None,
            pending_deletion: None,
            loading: false,
            last_refresh_epoch_ms: None,
        }
    }
}

impl MonitorState {
    pub fn with_auto_refresh(auto_refresh: bool) -> Self {
        Self {
            auto_refresh,
            ..Default::default()
        }
    }

    pub fn canvas(&self, id: CanvasId) -> Option<&Canvas> {
        self.canvases.iter().find(|c| c.id == id)
    }

    fn set_running(&mut self, canvases: &[Canvas], running: bool) {
        let ids: HashSet<CanvasId> = canvases.iter().map(|c| c.id).collect();
        for canvas in self.canvases.iter_mut().filter(|c| ids.contains(&c.id)) {
            canvas.effects_manager.running = running;
        }
    }

    /// Drop a pending deletion whose target has disappeared
    fn prune_pending_deletion(&mut self) {
        let still_exists = match &self.pending_deletion {
            None => return,
            Some(PendingDeletion::Canvas(canvas)) => self.canvas(canvas.id).is_some(),
            Some(PendingDeletion::Feature(model)) => self
                .canvas(model.canvas.id)
                .and_then(|c| c.feature(model.feature.id))
                .is_some(),
        };
        if !still_exists {
            self.pending_deletion = None;
        }
    }
}

/// Apply an action to the state. This is the only place state changes.
pub fn reduce(state: &mut MonitorState, action: &MonitorAction, now_ms: u64) {
    match action {
        MonitorAction::UpdateAutoRefresh(enabled) => {
            state.auto_refresh = *enabled;
        }
        MonitorAction::ActivateCanvases(canvases) => state.set_running(canvases, true),
        MonitorAction::DeactivateCanvases(canvases) => state.set_running(canvases, false),
        MonitorAction::ConfirmDeleteCanvas(canvas) => {
            state.pending_deletion = Some(PendingDeletion::Canvas(canvas.clone()));
        }
        MonitorAction::ConfirmDeleteFeature(model) => {
            state.pending_deletion = Some(PendingDeletion::Feature(model.clone()));
        }
        MonitorAction::ResolveDeletion { .. } => {
            state.pending_deletion = None;
        }
        MonitorAction::DeleteCanvas(canvas) => {
            state.canvases.retain(|c| c.id != canvas.id);
            state.prune_pending_deletion();
        }
        MonitorAction::DeleteFeature(model) => {
            if let Some(canvas) = state
                .canvases
                .iter_mut()
                .find(|c| c.id == model.canvas.id)
            {
                canvas.features.retain(|f| f.id != model.feature.id);
            }
            state.prune_pending_deletion();
        }
        MonitorAction::RefreshCanvases => {
            state.loading = true;
        }
        MonitorAction::CanvasesLoaded(canvases) => {
            state.canvases = canvases.clone();
            state.loading = false;
            state.connection_error = None;
            state.last_refresh_epoch_ms = Some(now_ms);
            state.prune_pending_deletion();
        }
        MonitorAction::ConnectionFailed(message) => {
            state.loading = false;
            let since_epoch_ms = state
                .connection_error
                .as_ref()
                .map(|e| e.since_epoch_ms)
                .unwrap_or(now_ms);
            state.connection_error = Some(ConnectionError {
                message: message.clone(),
                since_epoch_ms,
            });
        }
    }
}

pub fn get_canvases(state: &MonitorState) -> Vec<Canvas> {
    state.canvases.clone()
}

pub fn connection_error(state: &MonitorState) -> Option<ConnectionError> {
    state.connection_error.clone()
}

pub fn auto_refresh(state: &MonitorState) -> bool {
    state.auto_refresh
}

pub fn pending_deletion(state: &MonitorState) -> Option<PendingDeletion> {
    state.pending_deletion.clone()
}

pub fn active_canvases(state: &MonitorState) -> Vec<Canvas> {
    state
        .canvases
        .iter()
        .filter(|c| c.is_active())
        .cloned()
        .collect()
}
