#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    Status { url: String, status: u16 },
    /// The request never produced a response (DNS, TLS, CORS, offline...).
    Transport { url: String, message: String },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Status { url, status } => write!(f, "GET {url} -> HTTP {status}"),
            FetchError::Transport { url, message } => write!(f, "GET {url} failed: {message}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Binary GET used by the texture loader.
///
/// Futures are not required to be `Send`; the browser implementation holds
/// JS values across its await points.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<T: Fetch + ?Sized> Fetch for std::rc::Rc<T> {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::HttpFetcher;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{Fetch, FetchError};

    #[derive(Debug, Clone, Default)]
    pub struct HttpFetcher {
        client: reqwest::Client,
    }

    impl HttpFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl Fetch for HttpFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            let transport = |e: reqwest::Error| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            };

            let resp = self.client.get(url).send().await.map_err(transport)?;
            if !resp.status().is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: resp.status().as_u16(),
                });
            }
            let bytes = resp.bytes().await.map_err(transport)?;
            Ok(bytes.to_vec())
        }
    }
}
