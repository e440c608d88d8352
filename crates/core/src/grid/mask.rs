//! Boolean cell masks used for cloud patches and cloud drift

use crate::error::SimError;
use serde::{Deserialize, Serialize};

/// H×W boolean mask, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CellMaskRepr")]
pub struct CellMask {
    rows: usize,
    cols: usize,
    marked: Vec<bool>,
}

#[derive(Deserialize)]
struct CellMaskRepr {
    rows: usize,
    cols: usize,
    marked: Vec<bool>,
}

impl TryFrom<CellMaskRepr> for CellMask {
    type Error = SimError;

    fn try_from(repr: CellMaskRepr) -> Result<Self, SimError> {
        if repr.marked.len() != repr.rows * repr.cols {
            return Err(SimError::CellCountMismatch {
                expected: repr.rows * repr.cols,
                actual: repr.marked.len(),
            });
        }
        Ok(Self {
            rows: repr.rows,
            cols: repr.cols,
            marked: repr.marked,
        })
    }
}

impl CellMask {
    /// Create an all-false mask
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            marked: vec![false; rows * cols],
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Mark `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn mark(&mut self, row: usize, col: usize) {
        assert!(row < self.rows && col < self.cols, "Coordinates out of bounds");
        self.marked[row * self.cols + col] = true;
    }

    #[inline]
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.marked[row * self.cols + col]
    }

    /// True if any cell is marked
    pub fn any(&self) -> bool {
        self.marked.contains(&true)
    }

    /// Number of marked cells
    pub fn count(&self) -> usize {
        self.marked.iter().filter(|&&m| m).count()
    }

    /// Marked positions in row-major order
    pub fn iter_marked(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.marked
            .iter()
            .enumerate()
            .filter(|(_, &m)| m)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.marked
    }
}
