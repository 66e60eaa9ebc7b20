pub mod panorama;

pub use panorama::*;
