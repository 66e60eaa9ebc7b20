pub mod angle;
pub mod mat4;
pub mod vec;

pub use angle::*;
pub use mat4::*;
pub use vec::*;
