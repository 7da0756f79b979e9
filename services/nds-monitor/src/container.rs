//! Monitor container: binds store signals to the monitor view and turns view
//! events into actions

use crate::actions::MonitorAction;
use crate::model::{Canvas, CanvasFeature};
use crate::state::{self, ConnectionError, PendingDeletion};
use crate::store::{Signal, Store};

/// Stateless translator between the store and the monitor view
#[derive(Debug, Clone)]
pub struct MonitorContainer {
    store: Store,
    canvases: Signal<Vec<Canvas>>,
    connection_error: Signal<Option<ConnectionError>>,
    pending_deletion: Signal<Option<PendingDeletion>>,
    auto_refresh: Signal<bool>,
}

impl MonitorContainer {
    pub fn new(store: Store) -> Self {
        Self {
            canvases: store.select_signal(state::get_canvases),
            connection_error: store.select_signal(state::connection_error),
            pending_deletion: store.select_signal(state::pending_deletion),
            auto_refresh: store.select_signal(state::auto_refresh),
            store,
        }
    }

    pub fn canvases(&self) -> &Signal<Vec<Canvas>> {
        &self.canvases
    }

    pub fn connection_error(&self) -> &Signal<Option<ConnectionError>> {
        &self.connection_error
    }

    pub fn pending_deletion(&self) -> &Signal<Option<PendingDeletion>> {
        &self.pending_deletion
    }

    pub fn auto_refresh(&self) -> &Signal<bool> {
        &self.auto_refresh
    }

    pub fn on_auto_refresh(&self, value: bool) {
        self.store.dispatch(MonitorAction::UpdateAutoRefresh(value));
    }

    pub fn on_activate_canvases(&self, canvases: Vec<Canvas>) {
        self.store.dispatch(MonitorAction::ActivateCanvases(canvases));
    }

    pub fn on_deactivate_canvases(&self, canvases: Vec<Canvas>) {
        self.store.dispatch(MonitorAction::DeactivateCanvases(canvases));
    }

    /// Starts the confirmation flow; nothing is deleted until it is accepted
    pub fn on_delete_canvas(&self, canvas: Canvas) {
        self.store.dispatch(MonitorAction::ConfirmDeleteCanvas(canvas));
    }

    /// Starts the confirmation flow; nothing is deleted until it is accepted
    pub fn on_delete_feature(&self, model: CanvasFeature) {
        self.store.dispatch(MonitorAction::ConfirmDeleteFeature(model));
    }

    pub fn on_resolve_deletion(&self, accepted: bool) {
        self.store.dispatch(MonitorAction::ResolveDeletion { accepted });
    }
}
