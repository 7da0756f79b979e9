//! Single-writer state store with live signals
//!
//! State lives in a `watch` channel. `dispatch` reduces the action under the
//! channel's write lock, so every signal sees the new state on the same turn,
//! and then forwards the action to the effects stream.

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{mpsc, watch};

use crate::actions::MonitorAction;
use crate::state::{reduce, MonitorState};

/// An action as seen by effects, with the state it was applied to
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub action: MonitorAction,
    pub previous: MonitorState,
}

/// Receiving end of the dispatched-action stream
pub type ActionStream = mpsc::UnboundedReceiver<Dispatched>;

/// Process-wide holder of monitor state, mutated only through `dispatch`
#[derive(Clone)]
pub struct Store {
    state: Arc<watch::Sender<MonitorState>>,
    effects: Option<mpsc::UnboundedSender<Dispatched>>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.state.borrow())
            .field("effects", &self.effects.is_some())
            .finish()
    }
}

impl Store {
    /// Create a store whose dispatched actions are not observed by anyone
    pub fn new(initial: MonitorState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
            effects: None,
        }
    }

    /// Create a store together with the stream of dispatched actions
    pub fn with_effects(initial: MonitorState) -> (Self, ActionStream) {
        let (state, _) = watch::channel(initial);
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Self {
            state: Arc::new(state),
            effects: Some(tx),
        };
        (store, rx)
    }

    /// Apply an action. Never blocks and never fails.
    pub fn dispatch(&self, action: MonitorAction) {
        tracing::debug!("Dispatch {}", action);
        let now_ms = current_epoch_ms();
        let effects = self.effects.as_ref();

        self.state.send_modify(|state| {
            let previous = effects.map(|_| state.clone());
            reduce(state, &action, now_ms);

            // Sent under the write lock so effects see actions in reduce order
            if let (Some(tx), Some(previous)) = (effects, previous) {
                if tx.send(Dispatched { action, previous }).is_err() {
                    tracing::debug!("Effects stream closed, action not forwarded");
                }
            }
        });
    }

    /// A live projection of the state through `query`
    pub fn select_signal<T, F>(&self, query: F) -> Signal<T>
    where
        T: Clone + PartialEq,
        F: Fn(&MonitorState) -> T + Send + Sync + 'static,
    {
        Signal::new(self.state.subscribe(), Arc::new(query))
    }

    pub fn snapshot(&self) -> MonitorState {
        self.state.borrow().clone()
    }
}

/// A read-only, push-updating view of part of the store state
pub struct Signal<T> {
    rx: watch::Receiver<MonitorState>,
    query: Arc<dyn Fn(&MonitorState) -> T + Send + Sync>,
    last: T,
}

impl<T: Clone + PartialEq> Signal<T> {
    fn new(
        mut rx: watch::Receiver<MonitorState>,
        query: Arc<dyn Fn(&MonitorState) -> T + Send + Sync>,
    ) -> Self {
        let last = query(&rx.borrow_and_update());
        Self { rx, query, last }
    }

    /// Current value of the query
    pub fn get(&self) -> T {
        (self.query)(&self.rx.borrow())
    }

    /// Wait for the next value that differs from the last one observed.
    /// Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            let next = (self.query)(&self.rx.borrow_and_update());
            if next != self.last {
                self.last = next.clone();
                return Some(next);
            }
        }
    }
}

impl<T: Clone> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            query: Arc::clone(&self.query),
            last: self.last.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal").field("last", &self.last).finish()
    }
}

pub(crate) fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
