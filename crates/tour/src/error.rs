use gpu::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub enum TourError {
    /// The rendering surface could not be created or initialised.
    SurfaceInit(String),
    Config(String),
}

impl std::fmt::Display for TourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourError::SurfaceInit(msg) => write!(f, "3D view initialisation failed: {msg}"),
            TourError::Config(msg) => write!(f, "invalid tour config: {msg}"),
        }
    }
}

impl std::error::Error for TourError {}

impl From<RenderError> for TourError {
    fn from(e: RenderError) -> Self {
        TourError::SurfaceInit(e.to_string())
    }
}

impl From<serde_json::Error> for TourError {
    fn from(e: serde_json::Error) -> Self {
        TourError::Config(e.to_string())
    }
}
