use std::collections::BTreeMap;

use scene::components::{DecodedImage, Material, MaterialId, MeshId, SphereGeometry};
use tracing::debug;

use crate::backend::{RenderBackend, RenderError, SurfaceSize};
use crate::renderer::RenderFrame;

#[derive(Debug, Clone, PartialEq)]
pub struct ResidentMaterial {
    pub material: Material,
    /// Texture dimensions when the material carries one.
    pub texture: Option<(u32, u32)>,
}

/// Backend without a GPU: validates and records what would be drawn.
///
/// Used by the native driver and by tests to observe resource residency.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u64,
    meshes: BTreeMap<MeshId, usize>,
    materials: BTreeMap<MaterialId, ResidentMaterial>,
    size: Option<SurfaceSize>,
    frames: u64,
    last_frame: Option<RenderFrame>,
    released: bool,
    fail_texture_uploads: bool,
}

impl HeadlessBackend {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// Makes every textured upload fail, as a lost GPU context would.
    pub fn set_fail_texture_uploads(&mut self, fail: bool) {
        self.fail_texture_uploads = fail;
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn texture_count(&self) -> usize {
        self.materials.values().filter(|m| m.texture.is_some()).count()
    }

    pub fn material(&self, id: MaterialId) -> Option<&ResidentMaterial> {
        self.materials.get(&id)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl RenderBackend for HeadlessBackend {
    fn resize(&mut self, size: SurfaceSize) {
        self.size = Some(size);
    }

    fn upload_mesh(&mut self, geometry: &SphereGeometry) -> Result<MeshId, RenderError> {
        if self.released {
            return Err(RenderError::Released);
        }
        let id = MeshId(self.next_id());
        self.meshes.insert(id, geometry.vertex_count());
        Ok(id)
    }

    fn upload_material(
        &mut self,
        material: &Material,
        image: Option<&DecodedImage>,
    ) -> Result<MaterialId, RenderError> {
        if self.released {
            return Err(RenderError::Released);
        }
        let texture = match (material.textured, image) {
            (true, None) => return Err(RenderError::MissingTexture),
            (true, Some(_)) if self.fail_texture_uploads => {
                return Err(RenderError::Upload("texture upload rejected".into()));
            }
            (true, Some(img)) => Some((img.width, img.height)),
            (false, _) => None,
        };
        let id = MaterialId(self.next_id());
        self.materials.insert(
            id,
            ResidentMaterial {
                material: *material,
                texture,
            },
        );
        Ok(id)
    }

    fn release_mesh(&mut self, id: MeshId) {
        self.meshes.remove(&id);
    }

    fn release_material(&mut self, id: MaterialId) {
        self.materials.remove(&id);
    }

    fn render(&mut self, frame: &RenderFrame) -> Result<(), RenderError> {
        if self.released {
            return Err(RenderError::Released);
        }
        for draw in &frame.draws {
            if !self.meshes.contains_key(&draw.mesh) {
                return Err(RenderError::UnknownMesh(draw.mesh));
            }
            if !self.materials.contains_key(&draw.material) {
                return Err(RenderError::UnknownMaterial(draw.material));
            }
        }
        self.frames += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        debug!(
            meshes = self.meshes.len(),
            materials = self.materials.len(),
            "releasing headless backend"
        );
        self.meshes.clear();
        self.materials.clear();
        self.last_frame = None;
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::HeadlessBackend;
    use crate::backend::{RenderBackend, RenderError, SurfaceSize};
    use crate::renderer::{DrawCommand, RenderFrame};
    use foundation::math::IDENTITY;
    use scene::components::{Color, DecodedImage, Material, Side, SphereGeometry};

    fn frame(draws: Vec<DrawCommand>) -> RenderFrame {
        RenderFrame {
            frame_index: 0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            view_proj: IDENTITY,
            draws,
        }
    }

    #[test]
    fn tracks_residency() {
        let mut backend = HeadlessBackend::new(SurfaceSize::new(10, 10, 1.0));
        let mesh = backend.upload_mesh(&SphereGeometry::new(1.0, 8, 6)).expect("mesh");
        let img = DecodedImage::new(1, 1, vec![255; 4]).expect("image");
        let mat = backend
            .upload_material(&Material::basic(Color::WHITE).with_map(), Some(&img))
            .expect("material");
        assert_eq!((backend.mesh_count(), backend.material_count(), backend.texture_count()), (1, 1, 1));

        let draw = DrawCommand {
            mesh,
            material: mat,
            color: [1.0; 4],
            wireframe: false,
            side: Side::Double,
        };
        backend.render(&frame(vec![draw])).expect("render");
        assert_eq!(backend.frames_rendered(), 1);

        backend.release_material(mat);
        assert_eq!(
            backend.render(&frame(vec![draw])),
            Err(RenderError::UnknownMaterial(mat))
        );
    }

    #[test]
    fn textured_material_needs_an_image() {
        let mut backend = HeadlessBackend::default();
        let err = backend.upload_material(&Material::basic(Color::WHITE).with_map(), None);
        assert_eq!(err, Err(RenderError::MissingTexture));
    }

    #[test]
    fn release_is_idempotent_and_final() {
        let mut backend = HeadlessBackend::default();
        backend.upload_mesh(&SphereGeometry::new(1.0, 4, 3)).expect("mesh");
        backend.release();
        backend.release();
        assert!(backend.is_released());
        assert_eq!(backend.mesh_count(), 0);
        assert_eq!(
            backend.upload_mesh(&SphereGeometry::new(1.0, 4, 3)),
            Err(RenderError::Released)
        );
        assert_eq!(backend.render(&frame(Vec::new())), Err(RenderError::Released));
    }
}
