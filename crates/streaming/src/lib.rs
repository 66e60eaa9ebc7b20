pub mod decode;
pub mod io;
pub mod request;
pub mod residency;
pub mod texture;

pub use decode::*;
pub use io::*;
pub use request::*;
pub use residency::*;
pub use texture::*;
