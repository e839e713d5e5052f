pub mod pressure_grid;
pub mod snapshot;

pub use pressure_grid::*;
pub use snapshot::*;
