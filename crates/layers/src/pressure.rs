use foundation::color::{Hsl, Rgb};
use foundation::math::Vec3;
use formats::PressureGrid;
use scene::Composer;
use scene::entity::EntityId;
use scene::prefabs::spawn_ground_cell;

use crate::layer::{Layer, LayerId};

pub const HUE_AT_ZERO: f64 = 0.7;
pub const HUE_PER_UNIT: f64 = 0.1;
pub const CELL_SATURATION: f64 = 1.0;
pub const CELL_LIGHTNESS: f64 = 0.5;

/// Raw hue for a pressure sample, in turns. Not wrapped: values past roughly
/// `[-3, 7]` leave `[0, 1]` and wrap at color conversion.
pub fn pressure_hue(value: f64) -> f64 {
    HUE_AT_ZERO - value * HUE_PER_UNIT
}

pub fn pressure_color(value: f64) -> Hsl {
    Hsl::new(pressure_hue(value), CELL_SATURATION, CELL_LIGHTNESS)
}

/// One rendered pressure sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub hsl: Hsl,
    pub color: Rgb,
    /// Center of the tile; column maps to world X, row to world Z.
    pub position: Vec3,
}

/// Maps the pressure grid to flat colored tiles, one per sample.
///
/// Every tile is its own entity. Large grids cost `rows * cols` draws.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PressureLayer {
    id: LayerId,
    pub cell_size: f64,
}

impl PressureLayer {
    pub fn new(id: u64) -> Self {
        Self {
            id: LayerId(id),
            cell_size: 1.0,
        }
    }

    pub fn cells(&self, grid: &PressureGrid) -> Vec<Cell> {
        grid.iter()
            .map(|(row, col, value)| {
                let hsl = pressure_color(value);
                Cell {
                    row,
                    col,
                    value,
                    hsl,
                    color: hsl.to_rgb(),
                    position: Vec3::new(col as f64, 0.0, row as f64),
                }
            })
            .collect()
    }
}

impl Layer for PressureLayer {
    type Source = PressureGrid;

    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &'static str {
        "pressure"
    }

    fn populate(&self, composer: &mut Composer, grid: &PressureGrid) -> Vec<EntityId> {
        self.cells(grid)
            .into_iter()
            .map(|cell| {
                spawn_ground_cell(composer.world_mut(), cell.position, self.cell_size, cell.color)
            })
            .collect()
    }
}
