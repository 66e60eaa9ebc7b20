use foundation::math::Mat4;
use scene::SceneGraph;
use scene::components::{MaterialId, MeshId, PerspectiveCamera, Side};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshId,
    pub material: MaterialId,
    pub color: [f32; 4],
    pub wireframe: bool,
    pub side: Side,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub frame_index: u64,
    pub clear_color: [f32; 4],
    pub view_proj: Mat4,
    pub draws: Vec<DrawCommand>,
}

pub struct Renderer;

impl Renderer {
    pub fn collect(graph: &SceneGraph, camera: &PerspectiveCamera, frame_index: u64) -> RenderFrame {
        let draws = graph
            .visible_meshes()
            .into_iter()
            .map(|(_, mesh)| DrawCommand {
                mesh: mesh.geometry,
                material: mesh.material,
                color: mesh.desc.color.to_rgba(),
                wireframe: mesh.desc.wireframe,
                side: mesh.desc.side,
            })
            .collect();

        RenderFrame {
            frame_index,
            clear_color: graph.background().to_rgba(),
            view_proj: camera.view_proj(),
            draws,
        }
    }
}
