use serde::{Deserialize, Serialize};

/// One panorama in a house tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub id: String,
    pub title: String,
    pub is_main: bool,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

impl SceneDescriptor {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_main: false,
            image_url: image_url.into(),
            thumb_url: None,
        }
    }

    pub fn main(mut self) -> Self {
        self.is_main = true;
        self
    }

    pub fn with_thumb(mut self, thumb_url: impl Into<String>) -> Self {
        self.thumb_url = Some(thumb_url.into());
        self
    }

    /// URL to fetch for the panorama texture. The thumbnail wins when present
    /// since it is the smaller asset.
    pub fn texture_url(&self) -> Option<&str> {
        if let Some(thumb) = self.thumb_url.as_deref()
            && !thumb.is_empty()
        {
            return Some(thumb);
        }
        if self.image_url.is_empty() {
            None
        } else {
            Some(&self.image_url)
        }
    }
}
