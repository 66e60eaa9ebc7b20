use crate::components::Material;

/// Backend-issued key for uploaded vertex/index buffers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshId(pub u64);

/// Backend-issued key for an uploaded material (and its texture, if any).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: MeshId,
    pub material: MaterialId,
    pub desc: Material,
}

impl Mesh {
    pub fn new(geometry: MeshId, material: MaterialId, desc: Material) -> Self {
        Self {
            geometry,
            material,
            desc,
        }
    }
}
