use crate::components::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// Unlit material: a flat color, optionally multiplied by a diffuse map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Samples the diffuse map uploaded alongside the material.
    pub textured: bool,
    pub wireframe: bool,
    pub side: Side,
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            textured: false,
            wireframe: false,
            side: Side::Front,
        }
    }

    pub fn with_map(mut self) -> Self {
        self.textured = true;
        self
    }

    pub fn with_wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}
