use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressureGridError {
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl std::fmt::Display for PressureGridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PressureGridError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "pressure grid is not rectangular: row {row} has {found} columns, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for PressureGridError {}

/// Rectangular grid of pressure samples, stored row-major.
///
/// On the wire this is a nested array indexed `[row][col]`; every row must
/// have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PressureGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl PressureGrid {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, PressureGridError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (row, samples) in rows.iter().enumerate() {
            if samples.len() != cols {
                return Err(PressureGridError::Ragged {
                    row,
                    expected: cols,
                    found: samples.len(),
                });
            }
            values.extend_from_slice(samples);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            values,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }

    /// `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let cols = self.cols.max(1);
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / cols, i % cols, *v))
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut it = self.values.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl TryFrom<Vec<Vec<f64>>> for PressureGrid {
    type Error = PressureGridError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<PressureGrid> for Vec<Vec<f64>> {
    fn from(grid: PressureGrid) -> Self {
        if grid.cols == 0 {
            return vec![Vec::new(); grid.rows];
        }
        grid.values
            .chunks(grid.cols)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{PressureGrid, PressureGridError};
    use pretty_assertions::assert_eq;

    #[test]
    fn row_major_iteration() {
        let grid = PressureGrid::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(
            cells,
            vec![(0, 0, 0.0), (0, 1, 1.0), (1, 0, 2.0), (1, 1, 3.0)]
        );
    }

    #[test]
    fn non_square_grids_keep_shape() {
        let grid = PressureGrid::from_rows(vec![vec![1.0, 2.0, 3.0]; 2]).unwrap();
        assert_eq!((grid.rows(), grid.cols(), grid.len()), (2, 3, 6));
        assert_eq!(grid.get(1, 2), Some(3.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = PressureGrid::from_rows(vec![vec![0.0, 1.0], vec![2.0]]).unwrap_err();
        assert_eq!(
            err,
            PressureGridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn empty_grid_has_no_cells() {
        let grid = PressureGrid::from_rows(Vec::new()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
        assert_eq!(grid.min_max(), None);
    }

    #[test]
    fn min_max_spans_values() {
        let grid = PressureGrid::from_rows(vec![vec![4.0, -2.5], vec![9.0, 0.0]]).unwrap();
        assert_eq!(grid.min_max(), Some((-2.5, 9.0)));
    }

    #[test]
    fn serializes_back_to_nested_rows() {
        let rows = vec![vec![0.5, 1.5], vec![2.5, 3.5]];
        let grid = PressureGrid::from_rows(rows.clone()).unwrap();
        assert_eq!(Vec::<Vec<f64>>::from(grid), rows);
    }
}
