//! Auto-refresh engine: polls the server for canvases while enabled

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::actions::MonitorAction;
use crate::state::auto_refresh;
use crate::store::Store;

/// Dispatches `RefreshCanvases` on a fixed interval while auto-refresh is on
pub struct AutoRefresh {
    store: Store,
    interval: Duration,
    cancel: CancellationToken,
}

impl AutoRefresh {
    pub fn new(store: Store, interval: Duration, cancel: CancellationToken) -> Self {
        Self {
            store,
            interval,
            cancel,
        }
    }

    /// Refresh once, then keep refreshing until the cancellation token fires
    pub async fn run(&self) {
        let mut signal = self.store.select_signal(auto_refresh);
        let mut enabled = signal.get();
        self.refresh();

        loop {
            let changed = if enabled {
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {
                        self.refresh();
                        continue;
                    }
                    changed = signal.changed() => changed,
                    _ = self.cancel.cancelled() => break,
                }
            } else {
                tokio::select! {
                    changed = signal.changed() => changed,
                    _ = self.cancel.cancelled() => break,
                }
            };

            match changed {
                Some(true) => {
                    tracing::info!("Auto-refresh resumed every {:?}", self.interval);
                    enabled = true;
                    self.refresh();
                }
                Some(false) => {
                    tracing::info!("Auto-refresh paused");
                    enabled = false;
                }
                None => break,
            }
        }

        tracing::debug!("Auto-refresh loop stopped");
    }

    /// Dispatch a refresh unless the previous one is still in flight
    fn refresh(&self) {
        if self.store.snapshot().loading {
            tracing::debug!("Previous refresh still in flight, skipping");
            return;
        }
        self.store.dispatch(MonitorAction::RefreshCanvases);
    }
}
