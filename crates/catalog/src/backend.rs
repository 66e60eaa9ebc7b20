//! JSON contracts of the house backend and the transport that fetches them.

use serde::Deserialize;

use crate::{CatalogError, SceneDescriptor};

pub const DEFAULT_API_BASE_URL: &str = "https://api.homesee.xyz";
pub const DEFAULT_SCENES_PATH: &str = "/api/vr-scenes/{house_id}";
pub const DEFAULT_HOUSE_PATH: &str = "/api/room-info/{house_id}";

/// Scene ids arrive as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SceneIdDto {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for SceneIdDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneIdDto::Number(n) => write!(f, "{n}"),
            SceneIdDto::Text(s) => f.write_str(s),
        }
    }
}

/// `isMain` is sent as a bool or as `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagDto {
    Bool(bool),
    Int(i64),
}

impl FlagDto {
    pub fn as_bool(self) -> bool {
        match self {
            FlagDto::Bool(b) => b,
            FlagDto::Int(n) => n != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDto {
    pub id: SceneIdDto,
    #[serde(default)]
    pub scene_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub is_main: Option<FlagDto>,
}

impl SceneDto {
    pub fn into_descriptor(self, file_base: &str) -> SceneDescriptor {
        let thumb_url = self
            .thumb_url
            .map(|u| ensure_https(&u, file_base))
            .filter(|u| !u.is_empty());
        SceneDescriptor {
            id: self.id.to_string(),
            title: self.scene_name,
            is_main: self.is_main.is_some_and(FlagDto::as_bool),
            image_url: ensure_https(self.image_url.as_deref().unwrap_or_default(), file_base),
            thumb_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SceneListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<SceneDto>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    #[serde(default)]
    pub community_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HouseInfoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub room: Option<RoomDto>,
}

/// Normalises an asset URL to HTTPS on the file host.
///
/// `http://` is upgraded, absolute `https://` is kept, and anything else is
/// treated as a path on `file_base`. Empty input stays empty.
pub fn ensure_https(url: &str, file_base: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    if let Some(rest) = url.strip_prefix("http://") {
        return format!("https://{rest}");
    }
    if url.starts_with("https://") {
        return url.to_string();
    }
    let base = file_base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base}{url}")
    } else {
        format!("{base}/{url}")
    }
}

/// Substitutes `{house_id}` in a path template and joins it to `base_url`.
pub fn endpoint_url(base_url: &str, template: &str, house_id: &str) -> String {
    let path = template.replace("{house_id}", house_id);
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Source of house data. Futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait SceneSource {
    async fn scene_list(&self, house_id: &str) -> Result<SceneListResponse, CatalogError>;
    async fn house_info(&self, house_id: &str) -> Result<HouseInfoResponse, CatalogError>;
}

impl<T: SceneSource + ?Sized> SceneSource for std::rc::Rc<T> {
    async fn scene_list(&self, house_id: &str) -> Result<SceneListResponse, CatalogError> {
        (**self).scene_list(house_id).await
    }

    async fn house_info(&self, house_id: &str) -> Result<HouseInfoResponse, CatalogError> {
        (**self).house_info(house_id).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::HttpSceneSource;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use serde::de::DeserializeOwned;
    use tracing::debug;

    use super::{HouseInfoResponse, SceneListResponse, SceneSource, endpoint_url};
    use crate::CatalogError;

    #[derive(Debug, Clone)]
    pub struct HttpSceneSource {
        client: reqwest::Client,
        base_url: String,
        scenes_path: String,
        house_path: String,
    }

    impl HttpSceneSource {
        pub fn new(
            base_url: impl Into<String>,
            scenes_path: impl Into<String>,
            house_path: impl Into<String>,
        ) -> Self {
            Self {
                client: reqwest::Client::new(),
                base_url: base_url.into(),
                scenes_path: scenes_path.into(),
                house_path: house_path.into(),
            }
        }

        async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
            debug!("GET {url}");
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| CatalogError::Network(e.to_string()))?;
            if !resp.status().is_success() {
                return Err(CatalogError::Status(resp.status().as_u16()));
            }
            resp.json::<T>()
                .await
                .map_err(|e| CatalogError::Decode(e.to_string()))
        }
    }

    impl SceneSource for HttpSceneSource {
        async fn scene_list(&self, house_id: &str) -> Result<SceneListResponse, CatalogError> {
            let url = endpoint_url(&self.base_url, &self.scenes_path, house_id);
            self.get_json(&url).await
        }

        async fn house_info(&self, house_id: &str) -> Result<HouseInfoResponse, CatalogError> {
            let url = endpoint_url(&self.base_url, &self.house_path, house_id);
            self.get_json(&url).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_API_BASE_URL, DEFAULT_SCENES_PATH, SceneIdDto, SceneListResponse, endpoint_url,
        ensure_https,
    };
    use crate::SceneDescriptor;
    use pretty_assertions::assert_eq;

    const FILES: &str = "https://files.homesee.xyz";

    #[test]
    fn normalises_asset_urls() {
        assert_eq!(ensure_https("http://a.b/c.jpg", FILES), "https://a.b/c.jpg");
        assert_eq!(ensure_https("https://a.b/c.jpg", FILES), "https://a.b/c.jpg");
        assert_eq!(ensure_https("/api/x.jpg", FILES), "https://files.homesee.xyz/api/x.jpg");
        assert_eq!(ensure_https("x.jpg", "https://files.homesee.xyz/"), "https://files.homesee.xyz/x.jpg");
        assert_eq!(ensure_https("  ", FILES), "");
    }

    #[test]
    fn expands_endpoint_templates() {
        assert_eq!(
            endpoint_url(DEFAULT_API_BASE_URL, DEFAULT_SCENES_PATH, "42"),
            "https://api.homesee.xyz/api/vr-scenes/42"
        );
        assert_eq!(endpoint_url("http://localhost:8080/", "rooms/{house_id}", "7"), "http://localhost:8080/rooms/7");
    }

    #[test]
    fn parses_scene_list_with_mixed_ids() {
        let json = r#"{
            "success": true,
            "data": [
                {"id": 11, "sceneName": "Hall", "imageUrl": "http://cdn/h.jpg", "isMain": 1},
                {"id": "b-2", "sceneName": "Study", "imageUrl": "/api/s.jpg", "thumbUrl": "/api/s_t.jpg"}
            ]
        }"#;
        let resp: SceneListResponse = serde_json::from_str(json).expect("parse");
        let data = resp.data.expect("data");
        assert_eq!(data[1].id, SceneIdDto::Text("b-2".into()));

        let scenes: Vec<SceneDescriptor> = data.into_iter().map(|d| d.into_descriptor(FILES)).collect();
        assert_eq!(
            scenes,
            vec![
                SceneDescriptor::new("11", "Hall", "https://cdn/h.jpg").main(),
                SceneDescriptor::new("b-2", "Study", "https://files.homesee.xyz/api/s.jpg")
                    .with_thumb("https://files.homesee.xyz/api/s_t.jpg"),
            ]
        );
    }

    #[test]
    fn missing_data_parses_as_none() {
        let resp: SceneListResponse = serde_json::from_str(r#"{"success": false}"#).expect("parse");
        assert!(!resp.success);
        assert!(resp.data.is_none());
    }
}
