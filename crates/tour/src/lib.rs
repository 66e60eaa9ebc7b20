//! Panoramic house tour: orientation control, scene loading and the
//! page-level session that ties them to a view.

pub mod config;
pub mod controller;
pub mod error;
pub mod scene_manager;
pub mod session;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use scene_manager::*;
pub use session::*;
