pub mod frame;
pub mod render_loop;

pub use frame::*;
pub use render_loop::*;
