pub mod entities;
pub mod layer;
pub mod pressure;

pub use entities::*;
pub use layer::*;
pub use pressure::*;

use formats::Snapshot;
use scene::Composer;

pub const PRESSURE_LAYER_ID: u64 = 1;
pub const ENTITY_LAYER_ID: u64 = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PopulateSummary {
    pub cells: usize,
    pub markers: usize,
}

/// Add the cells and markers of one snapshot to the composer. Called once
/// during startup; the snapshot can be dropped afterwards.
pub fn populate_scene(composer: &mut Composer, snapshot: &Snapshot) -> PopulateSummary {
    let cells = PressureLayer::new(PRESSURE_LAYER_ID).populate(composer, &snapshot.pressure);
    let markers = EntityLayer::new(ENTITY_LAYER_ID).populate(composer, &snapshot.entities);
    PopulateSummary {
        cells: cells.len(),
        markers: markers.len(),
    }
}
