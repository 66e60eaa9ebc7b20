pub mod frame;
pub mod render_loop;
pub mod scheduler;

pub use frame::*;
pub use render_loop::*;
pub use scheduler::*;
