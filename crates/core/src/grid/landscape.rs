//! Fixed-size landscape grid
//!
//! Cells are stored row-major (`row * cols + col`). The grid is allocated once
//! and never resized; all neighbour lookups are bounds-checked and silently
//! skip positions outside the map (no wraparound).

use crate::core_types::{CellState, Offset};
use crate::error::{SimError, SimResult};
use crate::grid::CellMask;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Apply `offset` to `(row, col)`, returning `None` when it leaves a
/// `rows × cols` grid
#[inline]
pub fn offset_position(
    row: usize,
    col: usize,
    offset: Offset,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(offset.0)?;
    let c = col.checked_add_signed(offset.1)?;
    (r < rows && c < cols).then_some((r, c))
}

/// H×W grid of cell states
///
/// Deserialization goes through [`Landscape::from_cells`], so a serialized grid
/// with zero dimensions or the wrong number of cells is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LandscapeRepr")]
pub struct Landscape {
    rows: usize,
    cols: usize,
    /// Cell states in row-major order: [row * cols + col]
    cells: Vec<CellState>,
}

/// Unchecked wire form of [`Landscape`]
#[derive(Deserialize)]
struct LandscapeRepr {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl TryFrom<LandscapeRepr> for Landscape {
    type Error = SimError;

    fn try_from(repr: LandscapeRepr) -> SimResult<Self> {
        Self::from_cells(repr.rows, repr.cols, repr.cells)
    }
}

impl Landscape {
    /// Create a landscape of empty ground
    pub fn new(rows: usize, cols: usize) -> SimResult<Self> {
        Self::filled(rows, cols, CellState::Empty)
    }

    /// Create a landscape with every cell set to `state`
    pub fn filled(rows: usize, cols: usize, state: CellState) -> SimResult<Self> {
        validate_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![state; rows * cols],
        })
    }

    /// Wrap a row-major cell vector
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> SimResult<Self> {
        validate_dimensions(rows, cols)?;
        if cells.len() != rows * cols {
            return Err(SimError::CellCountMismatch {
                expected: rows * cols,
                actual: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Decode a row-major slice of legacy integer codes
    pub fn from_codes(rows: usize, cols: usize, codes: &[i8]) -> SimResult<Self> {
        let cells = codes
            .iter()
            .map(|&code| CellState::try_from(code))
            .collect::<SimResult<Vec<_>>>()?;
        Self::from_cells(rows, cols, cells)
    }

    /// Encode as row-major legacy integer codes
    pub fn to_codes(&self) -> Vec<i8> {
        self.cells.iter().map(|s| s.code()).collect()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: dimensions are validated positive
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, row-major
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    /// One row of cells
    #[inline]
    pub fn row(&self, row: usize) -> &[CellState] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Whether `(row, col)` lies inside the grid
    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get the state at a position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        assert!(self.in_bounds(row, col), "Coordinates out of bounds");
        self.cells[row * self.cols + col]
    }

    /// Set the state at a position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        assert!(self.in_bounds(row, col), "Coordinates out of bounds");
        self.cells[row * self.cols + col] = state;
    }

    /// Position reached from `(row, col)` by `offset`, if it is in the grid
    #[inline]
    pub fn neighbor(&self, row: usize, col: usize, offset: Offset) -> Option<(usize, usize)> {
        offset_position(row, col, offset, self.rows, self.cols)
    }

    /// Whether any in-grid neighbour at one of `offsets` holds `state`
    pub fn any_neighbor(&self, row: usize, col: usize, offsets: &[Offset], state: CellState) -> bool {
        offsets.iter().any(|&offset| {
            self.neighbor(row, col, offset)
                .is_some_and(|(r, c)| self.cells[r * self.cols + c] == state)
        })
    }

    /// Number of cells holding `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Whether at least one cell holds `state`
    pub fn contains(&self, state: CellState) -> bool {
        self.cells.contains(&state)
    }

    /// Iterate `(row, col, state)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &s)| (idx / cols, idx % cols, s))
    }

    /// Set every marked cell to `state`, overwriting whatever is there
    ///
    /// # Panics
    ///
    /// Panics if the mask shape differs from the landscape shape
    pub fn overlay(&mut self, mask: &CellMask, state: CellState) {
        assert_eq!(mask.shape(), self.shape(), "Mask shape mismatch");
        for (cell, &marked) in self.cells.iter_mut().zip(mask.as_slice()) {
            if marked {
                *cell = state;
            }
        }
    }

    /// Fail with `ShapeMismatch` unless this grid is `rows × cols`
    pub fn ensure_shape(&self, rows: usize, cols: usize) -> SimResult<()> {
        if self.shape() == (rows, cols) {
            Ok(())
        } else {
            Err(SimError::ShapeMismatch {
                expected: (rows, cols),
                actual: self.shape(),
            })
        }
    }
}

impl Index<(usize, usize)> for Landscape {
    type Output = CellState;

    fn index(&self, (row, col): (usize, usize)) -> &CellState {
        assert!(self.in_bounds(row, col), "Coordinates out of bounds");
        &self.cells[row * self.cols + col]
    }
}

pub(crate) fn validate_dimensions(rows: usize, cols: usize) -> SimResult<()> {
    if rows == 0 {
        return Err(SimError::InvalidDimension {
            name: "rows",
            value: rows,
        });
    }
    if cols == 0 {
        return Err(SimError::InvalidDimension {
            name: "cols",
            value: cols,
        });
    }
    Ok(())
}
