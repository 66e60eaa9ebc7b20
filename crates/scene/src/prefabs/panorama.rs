use crate::SceneGraph;
use crate::components::{Color, Material, Mesh, Side, SphereGeometry};
use crate::entity::NodeId;

/// Sphere dimensions for an equirectangular panorama.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanoramaShape {
    pub radius: f64,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PanoramaShape {
    fn default() -> Self {
        Self {
            radius: 500.0,
            width_segments: 60,
            height_segments: 40,
        }
    }
}

/// Inverted sphere: mirrored on X so its faces point at a camera placed at
/// the center.
pub fn panorama_geometry(shape: PanoramaShape) -> SphereGeometry {
    SphereGeometry::new(shape.radius, shape.width_segments, shape.height_segments)
        .scale(-1.0, 1.0, 1.0)
}

/// Wireframe sphere shown before any texture has arrived.
pub fn placeholder_material(color: Color) -> Material {
    Material::basic(color)
        .with_wireframe()
        .with_side(Side::Double)
}

/// Flat-color sphere used when the texture could not be fetched or decoded.
pub fn fallback_material(color: Color) -> Material {
    Material::basic(color).with_side(Side::Double)
}

pub fn textured_material() -> Material {
    Material::basic(Color::WHITE)
        .with_map()
        .with_side(Side::Double)
}

pub fn spawn_panorama(graph: &mut SceneGraph, mesh: Mesh) -> NodeId {
    graph.add(mesh)
}
