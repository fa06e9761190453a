use std::fmt;

use crate::error::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Agent,
    Opponent,
}

impl Cell {
    /// Numeric value of the cell: 0 empty, +1 agent, -1 opponent.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Agent => 1,
            Cell::Opponent => -1,
        }
    }

    pub fn from_value(value: i8) -> Option<Cell> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Agent),
            -1 => Some(Cell::Opponent),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Agent => 'X',
            Cell::Opponent => 'O',
        }
    }
}

/// A `size`^`dimension` board stored row-major: the last axis varies fastest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    dimension: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(size: usize, dimension: usize) -> Result<Self, GeometryError> {
        let len = cell_count(size, dimension)?;
        Ok(Grid {
            size,
            dimension,
            cells: vec![Cell::Empty; len],
        })
    }

    /// Build a grid from a flattened snapshot.
    pub fn from_cells(
        size: usize,
        dimension: usize,
        cells: Vec<Cell>,
    ) -> Result<Self, GeometryError> {
        let len = cell_count(size, dimension)?;
        if cells.len() != len {
            return Err(GeometryError::DimensionMismatch {
                expected: len,
                actual: cells.len(),
            });
        }
        Ok(Grid {
            size,
            dimension,
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of cells, which is also the size of the action space.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no symbol has been placed.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// Flattened, read-only view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Linear-index distance between neighbours along axis `k`.
    pub(crate) fn stride(&self, k: usize) -> usize {
        self.size.pow((self.dimension - 1 - k) as u32)
    }

    pub fn in_bounds(&self, coords: &[usize]) -> bool {
        coords.len() == self.dimension && coords.iter().all(|&c| c < self.size)
    }

    /// Convert coordinates to a linear index.
    pub fn index_of(&self, coords: &[usize]) -> Result<usize, GeometryError> {
        if coords.len() != self.dimension {
            return Err(GeometryError::DimensionMismatch {
                expected: self.dimension,
                actual: coords.len(),
            });
        }
        if !self.in_bounds(coords) {
            return Err(GeometryError::CoordinateOutOfBounds {
                coords: coords.to_vec(),
                size: self.size,
            });
        }
        Ok(coords.iter().fold(0, |acc, &c| acc * self.size + c))
    }

    /// Convert a linear index back to coordinates.
    pub fn coords_of(&self, index: usize) -> Result<Vec<usize>, GeometryError> {
        if index >= self.cells.len() {
            return Err(GeometryError::IndexOutOfBounds {
                index,
                cells: self.cells.len(),
            });
        }
        let mut coords = vec![0; self.dimension];
        let mut rest = index;
        for c in coords.iter_mut().rev() {
            *c = rest % self.size;
            rest /= self.size;
        }
        Ok(coords)
    }

    pub fn get(&self, coords: &[usize]) -> Result<Cell, GeometryError> {
        let index = self.index_of(coords)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, coords: &[usize], cell: Cell) -> Result<(), GeometryError> {
        let index = self.index_of(coords)?;
        self.cells[index] = cell;
        Ok(())
    }

    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn set_at(&mut self, index: usize, cell: Cell) -> Result<(), GeometryError> {
        let cells = self.cells.len();
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(GeometryError::IndexOutOfBounds { index, cells })?;
        *slot = cell;
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Linear indices of every empty cell, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

fn cell_count(size: usize, dimension: usize) -> Result<usize, GeometryError> {
    if dimension == 0 {
        return Err(GeometryError::InvalidDimension(dimension));
    }
    if size == 0 {
        return Err(GeometryError::InvalidSize(size));
    }
    u32::try_from(dimension)
        .ok()
        .and_then(|d| size.checked_pow(d))
        .ok_or(GeometryError::InvalidDimension(dimension))
}

/// Renders 2-D slices of the grid; higher dimensions print one slice per
/// combination of leading coordinates, separated by blank lines.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_len = self.size;
        let slice_len = if self.dimension == 1 {
            row_len
        } else {
            row_len * row_len
        };
        for (s, slice) in self.cells.chunks(slice_len).enumerate() {
            if s > 0 {
                writeln!(f)?;
            }
            for row in slice.chunks(row_len) {
                let line: String = row.iter().map(|c| c.symbol()).collect();
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}
