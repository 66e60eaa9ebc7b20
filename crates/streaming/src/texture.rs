use std::cell::RefCell;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use scene::components::DecodedImage;
use tracing::{debug, info, warn};

use crate::decode::decode_image;
use crate::io::Fetch;
use crate::residency::ResidencyState;

/// Result of a texture load. Failure is not an error: it resolves to the
/// placeholder sentinel and the caller shows a flat-color sphere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureOutcome {
    Image(DecodedImage),
    Placeholder,
}

impl TextureOutcome {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TextureOutcome::Placeholder)
    }
}

/// Fetches and decodes panorama textures, substituting a built-in fallback
/// URL when a scene carries none.
///
/// Nothing is cached; each call fetches and decodes anew.
#[derive(Debug)]
pub struct TextureLoader<F> {
    fetcher: F,
    fallback_urls: Vec<String>,
    rng: RefCell<SmallRng>,
}

impl<F: Fetch> TextureLoader<F> {
    pub fn new(fetcher: F, fallback_urls: Vec<String>, seed: u64) -> Self {
        Self {
            fetcher,
            fallback_urls,
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn fallback_urls(&self) -> &[String] {
        &self.fallback_urls
    }

    /// The URL that will actually be fetched: `url` when non-empty, otherwise
    /// a uniformly chosen fallback. `None` only when no fallback exists.
    pub fn resolve_url(&self, url: Option<&str>) -> Option<String> {
        match url.map(str::trim) {
            Some(u) if !u.is_empty() => Some(u.to_string()),
            _ => {
                if self.fallback_urls.is_empty() {
                    return None;
                }
                let idx = self.rng.borrow_mut().random_range(0..self.fallback_urls.len());
                Some(self.fallback_urls[idx].clone())
            }
        }
    }

    pub async fn load(&self, url: Option<&str>) -> TextureOutcome {
        let Some(url) = self.resolve_url(url) else {
            warn!("no texture url and no fallback configured");
            return TextureOutcome::Placeholder;
        };
        debug!(url = %url, state = %ResidencyState::Requested, "texture");

        debug!(url = %url, state = %ResidencyState::Downloading, "texture");
        let bytes = match self.fetcher.fetch(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(state = %ResidencyState::Fallback, "texture fetch failed: {e}");
                return TextureOutcome::Placeholder;
            }
        };

        debug!(url = %url, bytes = bytes.len(), state = %ResidencyState::Decoding, "texture");
        match decode_image(&bytes) {
            Ok(img) => {
                info!(
                    url = %url,
                    width = img.width,
                    height = img.height,
                    state = %ResidencyState::Resident,
                    "texture"
                );
                TextureOutcome::Image(img)
            }
            Err(e) => {
                warn!(url = %url, state = %ResidencyState::Fallback, "{e}");
                TextureOutcome::Placeholder
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TextureLoader, TextureOutcome};
    use crate::io::{Fetch, FetchError};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Cursor;

    #[derive(Default)]
    struct FakeFetch {
        responses: HashMap<String, Result<Vec<u8>, FetchError>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeFetch {
        fn with(mut self, url: &str, resp: Result<Vec<u8>, FetchError>) -> Self {
            self.responses.insert(url.to_string(), resp);
            self
        }
    }

    impl Fetch for FakeFetch {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.calls.borrow_mut().push(url.to_string());
            self.responses.get(url).cloned().unwrap_or(Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }))
        }
    }

    fn png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([200, 100, 50, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("encode png");
        buf
    }

    fn fallbacks() -> Vec<String> {
        vec!["https://f/a.jpg".into(), "https://f/b.jpg".into(), "https://f/c.jpg".into()]
    }

    #[tokio::test]
    async fn decodes_fetched_image() {
        let loader = TextureLoader::new(FakeFetch::default().with("https://x/p.png", Ok(png())), fallbacks(), 1);
        match loader.load(Some("https://x/p.png")).await {
            TextureOutcome::Image(img) => assert_eq!((img.width, img.height), (2, 1)),
            other => panic!("expected image, got {other:?}"),
        }
        assert_eq!(*loader.fetcher().calls.borrow(), vec!["https://x/p.png".to_string()]);
    }

    #[tokio::test]
    async fn empty_url_fetches_a_fallback() {
        let loader = TextureLoader::new(FakeFetch::default(), fallbacks(), 7);
        for url in [None, Some(""), Some("   ")] {
            assert_eq!(loader.load(url).await, TextureOutcome::Placeholder);
        }
        let calls = loader.fetcher().calls.borrow();
        assert_eq!(calls.len(), 3);
        for call in calls.iter() {
            assert!(fallbacks().contains(call), "unexpected url {call}");
        }
    }

    #[tokio::test]
    async fn fetch_and_decode_failures_become_placeholder() {
        let fetch = FakeFetch::default()
            .with(
                "https://x/down.jpg",
                Err(FetchError::Transport { url: "https://x/down.jpg".into(), message: "offline".into() }),
            )
            .with("https://x/html.jpg", Ok(b"<html>".to_vec()));
        let loader = TextureLoader::new(fetch, fallbacks(), 3);

        assert!(loader.load(Some("https://x/down.jpg")).await.is_placeholder());
        assert!(loader.load(Some("https://x/html.jpg")).await.is_placeholder());
        assert!(loader.load(Some("https://x/missing.jpg")).await.is_placeholder());
    }

    #[tokio::test]
    async fn no_fallbacks_means_no_fetch() {
        let loader = TextureLoader::new(FakeFetch::default(), Vec::new(), 0);
        assert!(loader.load(None).await.is_placeholder());
        assert!(loader.fetcher().calls.borrow().is_empty());
    }

    #[test]
    fn same_seed_picks_same_fallbacks() {
        let a = TextureLoader::new(FakeFetch::default(), fallbacks(), 42);
        let b = TextureLoader::new(FakeFetch::default(), fallbacks(), 42);
        let picks_a: Vec<_> = (0..8).map(|_| a.resolve_url(None)).collect();
        let picks_b: Vec<_> = (0..8).map(|_| b.resolve_url(None)).collect();
        assert_eq!(picks_a, picks_b);
        assert_eq!(a.resolve_url(Some("https://x/y.jpg")).as_deref(), Some("https://x/y.jpg"));
    }
}
