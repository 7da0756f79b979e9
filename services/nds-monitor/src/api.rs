//! NightDriver server REST client

use std::sync::Arc;

use async_trait::async_trait;

use crate::io::{HttpClient, HttpResponse};
use crate::model::{Canvas, CanvasId, FeatureId};
use crate::MonitorError;

/// Canvas operations offered by the NightDriver server
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait CanvasApi: Send + Sync {
    /// Fetch every canvas with its features
    async fn canvases(&self) -> crate::Result<Vec<Canvas>>;

    /// Start the effects of the given canvases
    async fn start_canvases(&self, ids: &[CanvasId]) -> crate::Result<()>;

    /// Stop the effects of the given canvases
    async fn stop_canvases(&self, ids: &[CanvasId]) -> crate::Result<()>;

    async fn delete_canvas(&self, id: CanvasId) -> crate::Result<()>;

    async fn delete_feature(&self, canvas_id: CanvasId, feature_id: FeatureId)
        -> crate::Result<()>;
}

/// `CanvasApi` over HTTP
pub struct NightDriverClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for NightDriverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NightDriverClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl NightDriverClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created NightDriverClient for {}", base_url);
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn check(response: HttpResponse) -> crate::Result<HttpResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(MonitorError::Api {
                status: response.status,
                body: response.body,
            })
        }
    }
}

#[async_trait]
impl CanvasApi for NightDriverClient {
    async fn canvases(&self) -> crate::Result<Vec<Canvas>> {
        let url = format!("{}/canvases", self.base_url);
        let response = Self::check(self.http.get(&url).await?)?;
        let canvases: Vec<Canvas> = serde_json::from_str(&response.body)?;
        tracing::debug!("Fetched {} canvases", canvases.len());
        Ok(canvases)
    }

    async fn start_canvases(&self, ids: &[CanvasId]) -> crate::Result<()> {
        let url = format!("{}/canvases/start", self.base_url);
        Self::check(self.http.post_json(&url, &serde_json::json!(ids)).await?)?;
        Ok(())
    }

    async fn stop_canvases(&self, ids: &[CanvasId]) -> crate::Result<()> {
        let url = format!("{}/canvases/stop", self.base_url);
        Self::check(self.http.post_json(&url, &serde_json::json!(ids)).await?)?;
        Ok(())
    }

    async fn delete_canvas(&self, id: CanvasId) -> crate::Result<()> {
        let url = format!("{}/canvases/{}", self.base_url, id);
        Self::check(self.http.delete(&url).await?)?;
        Ok(())
    }

    async fn delete_feature(
        &self,
        canvas_id: CanvasId,
        feature_id: FeatureId,
    ) -> crate::Result<()> {
        let url = format!(
            "{}/canvases/{}/features/{}",
            self.base_url, canvas_id, feature_id
        );
        Self::check(self.http.delete(&url).await?)?;
        Ok(())
    }
}
