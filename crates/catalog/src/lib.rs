use serde::Serialize;
use tracing::{info, warn};

pub mod backend;
pub mod demo;
pub mod descriptor;

pub use backend::*;
pub use demo::*;
pub use descriptor::*;

/// Shown when house metadata is unavailable.
pub const DEFAULT_HOUSE_TITLE: &str = "Panoramic house tour";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Network(String),
    Status(u16),
    Decode(String),
    /// The backend answered `success: false` or omitted the payload.
    Rejected,
    Empty,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Network(msg) => write!(f, "backend unreachable: {msg}"),
            CatalogError::Status(status) => write!(f, "backend returned HTTP {status}"),
            CatalogError::Decode(msg) => write!(f, "backend payload malformed: {msg}"),
            CatalogError::Rejected => write!(f, "backend rejected the request"),
            CatalogError::Empty => write!(f, "house has no scenes"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Where the scenes of a catalog came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogOrigin {
    Backend,
    Demo,
}

/// Ordered scenes of one tour plus the selected index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SceneCatalog {
    scenes: Vec<SceneDescriptor>,
    current_index: Option<usize>,
}

impl SceneCatalog {
    pub fn new(scenes: Vec<SceneDescriptor>) -> Self {
        Self {
            scenes,
            current_index: None,
        }
    }

    pub fn demo() -> Self {
        Self::new(demo_scenes())
    }

    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current(&self) -> Option<&SceneDescriptor> {
        self.current_index.and_then(|i| self.scenes.get(i))
    }

    /// Selects `index`. Returns `false` (leaving the selection untouched)
    /// when it is out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.scenes.len() {
            return false;
        }
        self.current_index = Some(index);
        true
    }

    pub fn initial_index(&self) -> usize {
        select_initial(&self.scenes)
    }
}

/// Index of the first main scene, else `0`.
pub fn select_initial(scenes: &[SceneDescriptor]) -> usize {
    scenes.iter().position(|s| s.is_main).unwrap_or(0)
}

async fn fetch_scenes<S: SceneSource>(
    source: &S,
    house_id: &str,
    file_base: &str,
) -> Result<Vec<SceneDescriptor>, CatalogError> {
    let resp = source.scene_list(house_id).await?;
    if !resp.success {
        return Err(CatalogError::Rejected);
    }
    let data = resp.data.ok_or(CatalogError::Rejected)?;
    if data.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(data
        .into_iter()
        .map(|dto| dto.into_descriptor(file_base))
        .collect())
}

/// Loads the scene list of `house_id`, substituting the demo catalog when the
/// backend fails or has nothing. The result is never empty.
pub async fn load_from_backend<S: SceneSource>(
    source: &S,
    house_id: &str,
    file_base: &str,
) -> (SceneCatalog, CatalogOrigin) {
    match fetch_scenes(source, house_id, file_base).await {
        Ok(scenes) => {
            info!(house_id, count = scenes.len(), "loaded scene list");
            (SceneCatalog::new(scenes), CatalogOrigin::Backend)
        }
        Err(e) => {
            warn!(house_id, "scene list unavailable, using demo scenes: {e}");
            (SceneCatalog::demo(), CatalogOrigin::Demo)
        }
    }
}

/// `"{community} - VR tour"` from the house metadata.
pub async fn fetch_house_title<S: SceneSource>(
    source: &S,
    house_id: &str,
) -> Result<String, CatalogError> {
    let resp = source.house_info(house_id).await?;
    if !resp.success {
        return Err(CatalogError::Rejected);
    }
    let name = resp
        .room
        .and_then(|room| room.community_name)
        .filter(|name| !name.trim().is_empty())
        .ok_or(CatalogError::Rejected)?;
    Ok(format!("{name} - VR tour"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    struct FakeSource {
        scenes: Result<&'static str, CatalogError>,
        house: Result<&'static str, CatalogError>,
        calls: Cell<u32>,
    }

    impl FakeSource {
        fn new(scenes: Result<&'static str, CatalogError>) -> Self {
            Self {
                scenes,
                house: Err(CatalogError::Status(500)),
                calls: Cell::new(0),
            }
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, CatalogError> {
        serde_json::from_str(json).map_err(|e| CatalogError::Decode(e.to_string()))
    }

    impl SceneSource for FakeSource {
        async fn scene_list(&self, _house_id: &str) -> Result<SceneListResponse, CatalogError> {
            self.calls.set(self.calls.get() + 1);
            parse(self.scenes.clone()?)
        }

        async fn house_info(&self, _house_id: &str) -> Result<HouseInfoResponse, CatalogError> {
            parse(self.house.clone()?)
        }
    }

    #[test]
    fn select_initial_prefers_main() {
        let scenes = vec![
            SceneDescriptor::new("a", "A", "u"),
            SceneDescriptor::new("b", "B", "u").main(),
            SceneDescriptor::new("c", "C", "u").main(),
        ];
        assert_eq!(select_initial(&scenes), 1);
        assert_eq!(select_initial(&scenes[..1]), 0);
        assert_eq!(select_initial(&[]), 0);
    }

    #[test]
    fn set_current_rejects_out_of_range() {
        let mut catalog = SceneCatalog::demo();
        assert_eq!(catalog.current_index(), None);
        assert!(catalog.set_current(2));
        assert!(!catalog.set_current(3));
        assert_eq!(catalog.current_index(), Some(2));
        assert_eq!(catalog.current().map(|s| s.title.as_str()), Some("Kitchen"));
    }

    #[tokio::test]
    async fn backend_scenes_are_normalised() {
        let source = FakeSource::new(Ok(
            r#"{"success":true,"data":[{"id":5,"sceneName":"Hall","imageUrl":"/api/h.jpg"}]}"#,
        ));
        let (catalog, origin) = load_from_backend(&source, "9", DEFAULT_FILE_BASE_URL).await;
        assert_eq!(origin, CatalogOrigin::Backend);
        assert_eq!(
            catalog.scenes(),
            &[SceneDescriptor::new("5", "Hall", "https://files.homesee.xyz/api/h.jpg")]
        );
    }

    #[tokio::test]
    async fn empty_or_failed_backend_yields_demo_catalog() {
        let cases = [
            Ok(r#"{"success":true,"data":[]}"#),
            Ok(r#"{"success":false,"data":[{"id":1,"sceneName":"x","imageUrl":"y"}]}"#),
            Ok(r#"{"success":true}"#),
            Ok("not json"),
            Err(CatalogError::Network("offline".into())),
            Err(CatalogError::Status(502)),
        ];
        for case in cases {
            let source = FakeSource::new(case);
            let (catalog, origin) = load_from_backend(&source, "9", DEFAULT_FILE_BASE_URL).await;
            assert_eq!(origin, CatalogOrigin::Demo);
            assert_eq!(catalog.len(), 3);
            assert_eq!(source.calls.get(), 1);
        }
    }

    #[tokio::test]
    async fn house_title_from_community_name() {
        let mut source = FakeSource::new(Err(CatalogError::Empty));
        source.house = Ok(r#"{"success":true,"room":{"communityName":"Maple Court","floor":3}}"#);
        assert_eq!(
            fetch_house_title(&source, "9").await,
            Ok("Maple Court - VR tour".to_string())
        );

        source.house = Ok(r#"{"success":true,"room":{}}"#);
        assert_eq!(fetch_house_title(&source, "9").await, Err(CatalogError::Rejected));
    }
}
