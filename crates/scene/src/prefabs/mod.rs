pub mod ground_cell;
pub mod marker_cube;

pub use ground_cell::*;
pub use marker_cube::*;
