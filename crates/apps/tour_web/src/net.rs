//! Browser `fetch` transports for textures and the house backend.

use catalog::{
    CatalogError, HouseInfoResponse, SceneListResponse, SceneSource, endpoint_url,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use streaming::{Fetch, FetchError};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooFetcher;

impl Fetch for GlooFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let transport = |e: gloo_net::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = Request::get(url).send().await.map_err(transport)?;
        if !resp.ok() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }
        resp.binary().await.map_err(transport)
    }
}

#[derive(Debug, Clone)]
pub struct GlooSceneSource {
    base_url: String,
    scenes_path: String,
    house_path: String,
}

impl GlooSceneSource {
    pub fn new(
        base_url: impl Into<String>,
        scenes_path: impl Into<String>,
        house_path: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            scenes_path: scenes_path.into(),
            house_path: house_path.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        debug!("GET {url}");
        let resp = Request::get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(CatalogError::Status(resp.status()));
        }
        resp.json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

impl SceneSource for GlooSceneSource {
    async fn scene_list(&self, house_id: &str) -> Result<SceneListResponse, CatalogError> {
        let url = endpoint_url(&self.base_url, &self.scenes_path, house_id);
        self.get_json(&url).await
    }

    async fn house_info(&self, house_id: &str) -> Result<HouseInfoResponse, CatalogError> {
        let url = endpoint_url(&self.base_url, &self.house_path, house_id);
        self.get_json(&url).await
    }
}
