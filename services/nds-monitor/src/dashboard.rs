//! Web dashboard: the monitor view, rendered as HTML plus JSON endpoints
//!
//! Reads go through the container's signals; every POST is translated into one
//! container call, which dispatches the matching action.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::container::MonitorContainer;
use crate::model::{Canvas, CanvasFeature, CanvasId, FeatureId};
use crate::state::PendingDeletion;

/// Version of the dashboard's page and JSON API
pub const DASHBOARD_VERSION: &str = "v1";

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub container: MonitorContainer,
}

#[derive(Debug, Deserialize)]
struct AutoRefreshRequest {
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct CanvasIdsRequest {
    ids: Vec<CanvasId>,
}

#[derive(Debug, Deserialize)]
struct ConfirmationRequest {
    accept: bool,
}

type HandlerResult = Result<StatusCode, (StatusCode, String)>;

/// Build the dashboard axum router
pub fn build_router(container: MonitorContainer) -> Router {
    let dashboard_state = DashboardState { container };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/canvases", get(canvases_handler))
        .route("/api/connection-error", get(connection_error_handler))
        .route("/api/pending-deletion", get(pending_deletion_handler))
        .route("/api/auto-refresh", post(auto_refresh_handler))
        .route("/api/canvases/activate", post(activate_handler))
        .route("/api/canvases/deactivate", post(deactivate_handler))
        .route("/api/canvases/{id}/delete", post(delete_canvas_handler))
        .route(
            "/api/canvases/{id}/features/{feature_id}/delete",
            post(delete_feature_handler),
        )
        .route("/api/confirmation", post(confirmation_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(dashboard_state)
}

async fn index_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let container = &dashboard.container;
    let canvases = container.canvases().get();
    let auto_refresh = container.auto_refresh().get();

    let error_banner = match container.connection_error().get() {
        Some(error) => format!(
            r#"<div id="connection-error" style="padding: 0.75rem; margin-bottom: 1rem; border-radius: 0.25rem; color: #721c24; background-color: #f8d7da;">Connection error: {}</div>"#,
            escape_html(&error.message)
        ),
        None => String::new(),
    };

    let confirmation = match container.pending_deletion().get() {
        Some(pending) => {
            let subject = match &pending {
                PendingDeletion::Canvas(canvas) => format!("canvas '{}'", escape_html(&canvas.name)),
                PendingDeletion::Feature(model) => format!(
                    "feature '{}' from canvas '{}'",
                    escape_html(&model.feature.friendly_name),
                    escape_html(&model.canvas.name)
                ),
            };
            format!(
                r#"<div id="confirmation" style="padding: 0.75rem; margin-bottom: 1rem; border-radius: 0.25rem; background-color: #fff3cd;">
        Delete {}?
        <button onclick="post('/api/confirmation', {{accept: true}})">Delete</button>
        <button onclick="post('/api/confirmation', {{accept: false}})">Cancel</button>
    </div>"#,
                subject
            )
        }
        None => String::new(),
    };

    let canvas_rows: String = canvases.iter().map(canvas_row).collect();

    let reload_script = if auto_refresh {
        "setInterval(() => location.reload(), 5000);"
    } else {
        ""
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>NightDriver Monitor</title>
    <script>
        function post(url, body) {{
            fetch(url, {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify(body || {{}})
            }}).then(() => location.reload());
        }}
        {reload_script}
    </script>
</head>
<body style="font-family: system-ui, sans-serif; max-width: 960px; margin: 0 auto; padding: 1rem;">
    <h1>NightDriver Monitor</h1>
    {error_banner}
    {confirmation}
    <label>
        <input type="checkbox" id="auto-refresh" {checked} onchange="post('/api/auto-refresh', {{enabled: this.checked}})">
        Auto-refresh
    </label>
    <section>
        <h2>Canvases</h2>
        <table style="width: 100%; border-collapse: collapse;">
            <thead>
                <tr style="border-bottom: 2px solid #dee2e6;">
                    <th style="padding: 0.5rem; text-align: left;">Name</th>
                    <th style="padding: 0.5rem; text-align: left;">Size</th>
                    <th style="padding: 0.5rem; text-align: left;">Effect</th>
                    <th style="padding: 0.5rem; text-align: left;">State</th>
                    <th style="padding: 0.5rem; text-align: left;">Features</th>
                    <th style="padding: 0.5rem; text-align: left;"></th>
                </tr>
            </thead>
            <tbody id="canvas-body">{canvas_rows}</tbody>
        </table>
    </section>
</body>
</html>"#,
        reload_script = reload_script,
        error_banner = error_banner,
        confirmation = confirmation,
        checked = if auto_refresh { "checked" } else { "" },
        canvas_rows = canvas_rows,
    );

    Html(html)
}

fn canvas_row(canvas: &Canvas) -> String {
    let (label, color, bg, toggle) = if canvas.is_active() {
        ("Active", "#155724", "#d4edda", "deactivate")
    } else {
        ("Inactive", "#383d41", "#e2e3e5", "activate")
    };

    let features: String = canvas
        .features
        .iter()
        .map(|f| {
            let link = match f.is_connected {
                Some(true) => "connected",
                Some(false) => "disconnected",
                None => "no socket",
            };
            format!(
                r#"<li>{} ({}:{}, {}x{} @ {},{}, {}) <button onclick="post('/api/canvases/{}/features/{}/delete')">Delete</button></li>"#,
                escape_html(&f.friendly_name),
                escape_html(&f.host_name),
                f.port,
                f.width,
                f.height,
                f.offset_x,
                f.offset_y,
                link,
                canvas.id,
                f.id
            )
        })
        .collect();

    format!(
        r#"<tr style="border-bottom: 1px solid #dee2e6;">
                    <td style="padding: 0.5rem;">{}</td>
                    <td style="padding: 0.5rem;">{}x{}</td>
                    <td style="padding: 0.5rem;">{}</td>
                    <td style="padding: 0.5rem;">
                        <span style="display: inline-block; padding: 0.25em 0.6em; border-radius: 0.25rem; font-size: 0.85em; font-weight: 600; color: {}; background-color: {};">{}</span>
                    </td>
                    <td style="padding: 0.5rem;"><ul style="margin: 0;">{}</ul></td>
                    <td style="padding: 0.5rem;">
                        <button onclick="post('/api/canvases/{}', {{ids: [{}]}})">{}</button>
                        <button onclick="post('/api/canvases/{}/delete')">Delete</button>
                    </td>
                </tr>"#,
        escape_html(&canvas.name),
        canvas.width,
        canvas.height,
        escape_html(&canvas.current_effect_name),
        color,
        bg,
        label,
        features,
        toggle,
        canvas.id,
        toggle,
        canvas.id
    )
}

async fn canvases_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    Json(dashboard.container.canvases().get())
}

async fn connection_error_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    Json(dashboard.container.connection_error().get())
}

async fn pending_deletion_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    Json(dashboard.container.pending_deletion().get())
}

async fn auto_refresh_handler(
    State(dashboard): State<DashboardState>,
    Json(request): Json<AutoRefreshRequest>,
) -> StatusCode {
    dashboard.container.on_auto_refresh(request.enabled);
    StatusCode::ACCEPTED
}

async fn activate_handler(
    State(dashboard): State<DashboardState>,
    Json(request): Json<CanvasIdsRequest>,
) -> HandlerResult {
    let canvases = resolve_canvases(&dashboard.container, &request.ids)?;
    dashboard.container.on_activate_canvases(canvases);
    Ok(StatusCode::ACCEPTED)
}

async fn deactivate_handler(
    State(dashboard): State<DashboardState>,
    Json(request): Json<CanvasIdsRequest>,
) -> HandlerResult {
    let canvases = resolve_canvases(&dashboard.container, &request.ids)?;
    dashboard.container.on_deactivate_canvases(canvases);
    Ok(StatusCode::ACCEPTED)
}

async fn delete_canvas_handler(
    State(dashboard): State<DashboardState>,
    Path(id): Path<CanvasId>,
) -> HandlerResult {
    let mut canvases = resolve_canvases(&dashboard.container, &[id])?;
    dashboard.container.on_delete_canvas(canvases.remove(0));
    Ok(StatusCode::ACCEPTED)
}

async fn delete_feature_handler(
    State(dashboard): State<DashboardState>,
    Path((id, feature_id)): Path<(CanvasId, FeatureId)>,
) -> HandlerResult {
    let mut canvases = resolve_canvases(&dashboard.container, &[id])?;
    let canvas = canvases.remove(0);
    let feature = canvas.feature(feature_id).cloned().ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Feature {} not found on canvas {}", feature_id, id),
        )
    })?;
    dashboard
        .container
        .on_delete_feature(CanvasFeature { canvas, feature });
    Ok(StatusCode::ACCEPTED)
}

async fn confirmation_handler(
    State(dashboard): State<DashboardState>,
    Json(request): Json<ConfirmationRequest>,
) -> StatusCode {
    dashboard.container.on_resolve_deletion(request.accept);
    StatusCode::ACCEPTED
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}

/// Look up canvases by id in the current view, keeping request order
fn resolve_canvases(
    container: &MonitorContainer,
    ids: &[CanvasId],
) -> Result<Vec<Canvas>, (StatusCode, String)> {
    let current = container.canvases().get();
    ids.iter()
        .map(|id| {
            current
                .iter()
                .find(|c| c.id == *id)
                .cloned()
                .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Canvas {} not found", id)))
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
