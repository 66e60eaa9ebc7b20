//! Math and handle primitives shared by the scene, renderer and tour crates.

pub mod handles;
pub mod math;

pub use handles::*;
