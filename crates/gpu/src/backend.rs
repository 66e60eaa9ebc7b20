use scene::components::{DecodedImage, Material, MaterialId, MeshId, SphereGeometry};

use crate::renderer::RenderFrame;

/// Drawable surface size in CSS pixels plus the device pixel ratio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    pub fn physical_width(&self) -> u32 {
        ((self.width as f64 * self.pixel_ratio).round() as u32).max(1)
    }

    pub fn physical_height(&self) -> u32 {
        ((self.height as f64 * self.pixel_ratio).round() as u32).max(1)
    }

    pub fn aspect(&self) -> f64 {
        self.width.max(1) as f64 / self.height.max(1) as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    Surface(String),
    Upload(String),
    /// A textured material was uploaded without an image.
    MissingTexture,
    UnknownMesh(MeshId),
    UnknownMaterial(MaterialId),
    Draw(String),
    Released,
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Surface(msg) => write!(f, "surface error: {msg}"),
            RenderError::Upload(msg) => write!(f, "upload failed: {msg}"),
            RenderError::MissingTexture => write!(f, "textured material uploaded without an image"),
            RenderError::UnknownMesh(id) => write!(f, "unknown mesh {}", id.0),
            RenderError::UnknownMaterial(id) => write!(f, "unknown material {}", id.0),
            RenderError::Draw(msg) => write!(f, "draw failed: {msg}"),
            RenderError::Released => write!(f, "render backend already released"),
        }
    }
}

impl std::error::Error for RenderError {}

/// GPU-side owner of meshes, materials and their textures.
///
/// Ids handed out by a backend are only meaningful to that backend. Releasing
/// an unknown id is a no-op.
pub trait RenderBackend {
    fn resize(&mut self, size: SurfaceSize);

    /// Uploads vertex data along with both triangle and wireframe indices.
    fn upload_mesh(&mut self, geometry: &SphereGeometry) -> Result<MeshId, RenderError>;

    fn upload_material(
        &mut self,
        material: &Material,
        image: Option<&DecodedImage>,
    ) -> Result<MaterialId, RenderError>;

    fn release_mesh(&mut self, id: MeshId);

    fn release_material(&mut self, id: MaterialId);

    fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError>;

    /// Frees every resource and the surface itself. Idempotent.
    fn release(&mut self);
}
