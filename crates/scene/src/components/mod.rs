pub mod camera;
pub mod color;
pub mod geometry;
pub mod image;
pub mod material;
pub mod mesh;
pub mod visibility;

pub use camera::*;
pub use color::*;
pub use geometry::*;
pub use image::*;
pub use material::*;
pub use mesh::*;
pub use visibility::*;
