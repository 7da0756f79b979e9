//! Actions accepted by the monitor store

use std::fmt;

use crate::model::{Canvas, CanvasFeature};

/// A typed intent submitted to the store
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorAction {
    /// Turn periodic canvas refresh on or off
    UpdateAutoRefresh(bool),
    ActivateCanvases(Vec<Canvas>),
    DeactivateCanvases(Vec<Canvas>),
    /// Ask the user before deleting a canvas
    ConfirmDeleteCanvas(Canvas),
    /// Ask the user before deleting a feature
    ConfirmDeleteFeature(CanvasFeature),
    /// The user's answer to the pending confirmation
    ResolveDeletion { accepted: bool },

    RefreshCanvases,
    CanvasesLoaded(Vec<Canvas>),
    ConnectionFailed(String),
    DeleteCanvas(Canvas),
    DeleteFeature(CanvasFeature),
}

impl MonitorAction {
    /// Short name used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            MonitorAction::UpdateAutoRefresh(_) => "UpdateAutoRefresh",
            MonitorAction::ActivateCanvases(_) => "ActivateCanvases",
            MonitorAction::DeactivateCanvases(_) => "DeactivateCanvases",
            MonitorAction::ConfirmDeleteCanvas(_) => "ConfirmDeleteCanvas",
            MonitorAction::ConfirmDeleteFeature(_) => "ConfirmDeleteFeature",
            MonitorAction::ResolveDeletion { .. } => "ResolveDeletion",
            MonitorAction::RefreshCanvases => "RefreshCanvases",
            MonitorAction::CanvasesLoaded(_) => "CanvasesLoaded",
            MonitorAction::ConnectionFailed(_) => "ConnectionFailed",
            MonitorAction::DeleteCanvas(_) => "DeleteCanvas",
            MonitorAction::DeleteFeature(_) => "DeleteFeature",
        }
    }
}

impl fmt::Display for MonitorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorAction::UpdateAutoRefresh(enabled) => write!(f, "UpdateAutoRefresh({})", enabled),
            MonitorAction::ActivateCanvases(canvases) | MonitorAction::DeactivateCanvases(canvases) => {
                let ids: Vec<String> = canvases.iter().map(|c| c.id.to_string()).collect();
                write!(f, "{}([{}])", self.kind(), ids.join(", "))
            }
            MonitorAction::ConfirmDeleteCanvas(canvas) | MonitorAction::DeleteCanvas(canvas) => {
                write!(f, "{}({})", self.kind(), canvas.id)
            }
            MonitorAction::ConfirmDeleteFeature(model) | MonitorAction::DeleteFeature(model) => {
                write!(f, "{}({}/{})", self.kind(), model.canvas.id, model.feature.id)
            }
            MonitorAction::ResolveDeletion { accepted } => {
                write!(f, "ResolveDeletion(accepted={})", accepted)
            }
            MonitorAction::CanvasesLoaded(canvases) => {
                write!(f, "CanvasesLoaded({} canvases)", canvases.len())
            }
            MonitorAction::ConnectionFailed(message) => write!(f, "ConnectionFailed({})", message),
            MonitorAction::RefreshCanvases => write!(f, "RefreshCanvases"),
        }
    }
}
