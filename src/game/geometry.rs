//! Dimension-agnostic win detection.
//!
//! A win is a run of `connect_n` equal symbols along any straight line through
//! the cell that was just played. Lines are enumerated as canonical axis
//! vectors over {-1, 0, 1}^D with antiparallel pairs collapsed, so a move is
//! checked in O(axes x size) instead of rescanning the whole board.

use crate::error::GeometryError;

use super::grid::{Cell, Grid};

/// A non-zero direction vector with components in {-1, 0, 1}.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Axis(Vec<i8>);

impl Axis {
    pub fn new(components: Vec<i8>) -> Result<Self, GeometryError> {
        let in_range = components.iter().all(|c| (-1..=1).contains(c));
        let non_zero = components.iter().any(|&c| c != 0);
        if !in_range || !non_zero {
            return Err(GeometryError::InvalidAxis(components));
        }
        Ok(Axis(components))
    }

    pub fn components(&self) -> &[i8] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn negated(&self) -> Axis {
        Axis(self.0.iter().map(|c| -c).collect())
    }
}

/// Enumerate the (3^D - 1) / 2 canonical line directions of a D-dimensional
/// grid, one representative per antipodal pair.
///
/// Tuples are generated in lexicographic order over (-1, 0, 1), so a tuple's
/// negation has already been seen exactly when the negation sorts first.
pub fn axis_directions(dimension: usize) -> Result<Vec<Axis>, GeometryError> {
    if dimension == 0 {
        return Err(GeometryError::InvalidDimension(dimension));
    }
    let total = u32::try_from(dimension)
        .ok()
        .and_then(|d| 3usize.checked_pow(d))
        .ok_or(GeometryError::InvalidDimension(dimension))?;

    let mut axes = Vec::with_capacity((total - 1) / 2);
    for n in 0..total {
        let mut vector = vec![0i8; dimension];
        let mut rest = n;
        for c in vector.iter_mut().rev() {
            *c = (rest % 3) as i8 - 1;
            rest /= 3;
        }
        let negation: Vec<i8> = vector.iter().map(|c| -c).collect();
        // The zero tuple is its own negation and is dropped here as well.
        if vector < negation {
            axes.push(Axis(vector));
        }
    }
    Ok(axes)
}

/// Collect every cell on the line through `cell` along `axis`, from the
/// boundary-limited start of the line to its end.
///
/// The start is the last in-bounds point reached by repeatedly subtracting
/// `axis`; the walk then adds `axis` until it leaves the grid. Both step
/// counts are computed directly from the coordinates, so the only allocation
/// is the returned line.
pub fn extract_line(grid: &Grid, cell: &[usize], axis: &Axis) -> Result<Vec<Cell>, GeometryError> {
    if axis.dimension() != grid.dimension() {
        return Err(GeometryError::DimensionMismatch {
            expected: grid.dimension(),
            actual: axis.dimension(),
        });
    }
    grid.index_of(cell)?;

    let last = grid.size() - 1;
    let components = axis.components();

    let back = components
        .iter()
        .zip(cell)
        .filter_map(|(&a, &c)| match a {
            1 => Some(c),
            -1 => Some(last - c),
            _ => None,
        })
        .min()
        .unwrap_or(0);

    let start = |a: i8, c: usize| match a {
        1 => c - back,
        -1 => c + back,
        _ => c,
    };

    let forward = components
        .iter()
        .zip(cell)
        .filter_map(|(&a, &c)| match a {
            1 => Some(last - start(a, c)),
            -1 => Some(start(a, c)),
            _ => None,
        })
        .min()
        .unwrap_or(0);

    let mut index = 0isize;
    let mut delta = 0isize;
    for (k, (&a, &c)) in components.iter().zip(cell).enumerate() {
        let stride = grid.stride(k) as isize;
        index += start(a, c) as isize * stride;
        delta += a as isize * stride;
    }

    let cells = grid.cells();
    let mut line = Vec::with_capacity(forward + 1);
    for _ in 0..=forward {
        line.push(cells[index as usize]);
        index += delta;
    }
    Ok(line)
}

/// True as soon as `n` consecutive entries equal `target`.
pub fn has_run(sequence: &[Cell], target: Cell, n: usize) -> Result<bool, GeometryError> {
    if n == 0 {
        return Err(GeometryError::InvalidRunLength(n));
    }
    if target.is_empty() {
        return Err(GeometryError::EmptyTarget);
    }

    let mut chain = 0;
    for &item in sequence {
        if item == target {
            chain += 1;
            if chain == n {
                return Ok(true);
            }
        } else {
            chain = 0;
        }
    }
    Ok(false)
}

/// Check whether the symbol at `last_cell` completes a run of `connect_n`.
///
/// Recomputes the axis set on every call; use [`WinOracle`] to reuse it.
pub fn is_winning_move(
    grid: &Grid,
    last_cell: &[usize],
    connect_n: usize,
) -> Result<bool, GeometryError> {
    if connect_n == 0 {
        return Err(GeometryError::InvalidRunLength(connect_n));
    }
    let axes = axis_directions(grid.dimension())?;
    completes_run(grid, last_cell, &axes, connect_n)
}

fn completes_run(
    grid: &Grid,
    last_cell: &[usize],
    axes: &[Axis],
    connect_n: usize,
) -> Result<bool, GeometryError> {
    let symbol = grid.get(last_cell)?;
    if symbol.is_empty() {
        return Err(GeometryError::EmptyCell(last_cell.to_vec()));
    }

    for axis in axes {
        let line = extract_line(grid, last_cell, axis)?;
        if has_run(&line, symbol, connect_n)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Validated board shape and win length with the axis set computed once.
#[derive(Debug, Clone)]
pub struct WinOracle {
    size: usize,
    dimension: usize,
    connect_n: usize,
    axes: Vec<Axis>,
}

impl WinOracle {
    pub fn new(size: usize, dimension: usize, connect_n: usize) -> Result<Self, GeometryError> {
        if size == 0 {
            return Err(GeometryError::InvalidSize(size));
        }
        if connect_n == 0 || connect_n > size {
            return Err(GeometryError::InvalidRunLength(connect_n));
        }
        let axes = axis_directions(dimension)?;
        Ok(WinOracle {
            size,
            dimension,
            connect_n,
            axes,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn connect_n(&self) -> usize {
        self.connect_n
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Pure predicate queried right after a symbol is placed at `last_cell`.
    pub fn is_winning_move(&self, grid: &Grid, last_cell: &[usize]) -> Result<bool, GeometryError> {
        if grid.dimension() != self.dimension {
            return Err(GeometryError::DimensionMismatch {
                expected: self.dimension,
                actual: grid.dimension(),
            });
        }
        if grid.size() != self.size {
            return Err(GeometryError::InvalidSize(grid.size()));
        }
        completes_run(grid, last_cell, &self.axes, self.connect_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2d(rows: [[i8; 3]; 3]) -> Grid {
        let cells = rows
            .iter()
            .flatten()
            .map(|&v| Cell::from_value(v).unwrap())
            .collect();
        Grid::from_cells(3, 2, cells).unwrap()
    }

    #[test]
    fn test_axis_count_per_dimension() {
        assert_eq!(axis_directions(1).unwrap().len(), 1);
        assert_eq!(axis_directions(2).unwrap().len(), 4);
        assert_eq!(axis_directions(3).unwrap().len(), 13);
        assert_eq!(axis_directions(4).unwrap().len(), 40);
    }

    #[test]
    fn test_axis_directions_2d_cover_classic_lines() {
        let axes = axis_directions(2).unwrap();
        for expected in [vec![1, 0], vec![0, 1], vec![1, 1], vec![1, -1]] {
            let axis = Axis::new(expected).unwrap();
            assert!(
                axes.contains(&axis) || axes.contains(&axis.negated()),
                "missing {:?}",
                axis
            );
        }
    }

    #[test]
    fn test_axis_directions_stable_order() {
        assert_eq!(axis_directions(3).unwrap(), axis_directions(3).unwrap());
    }

    #[test]
    fn test_axis_directions_rejects_zero_dimension() {
        assert_eq!(axis_directions(0), Err(GeometryError::InvalidDimension(0)));
    }

    #[test]
    fn test_axis_new_validates() {
        assert!(Axis::new(vec![0, 0]).is_err());
        assert!(Axis::new(vec![2, 0]).is_err());
        assert!(Axis::new(vec![0, -1]).is_ok());
    }

    #[test]
    fn test_extract_diagonal_from_center_and_corner() {
        let grid = grid_2d([[1, 0, 0], [0, -1, 0], [0, 0, 1]]);
        let diagonal = Axis::new(vec![1, 1]).unwrap();
        let expected = vec![Cell::Agent, Cell::Opponent, Cell::Agent];
        assert_eq!(extract_line(&grid, &[1, 1], &diagonal).unwrap(), expected);
        assert_eq!(extract_line(&grid, &[0, 0], &diagonal).unwrap(), expected);
        assert_eq!(extract_line(&grid, &[2, 2], &diagonal).unwrap(), expected);
    }

    #[test]
    fn test_extract_line_negated_axis_reverses() {
        let grid = grid_2d([[1, 0, -1], [0, 0, 0], [0, 0, 0]]);
        let row = Axis::new(vec![0, 1]).unwrap();
        let forward = extract_line(&grid, &[0, 1], &row).unwrap();
        let mut backward = extract_line(&grid, &[0, 1], &row.negated()).unwrap();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward, vec![Cell::Agent, Cell::Empty, Cell::Opponent]);
    }

    #[test]
    fn test_extract_short_anti_diagonal() {
        // (0,1) -> (1,0) is only two cells long on a 3x3 board.
        let grid = grid_2d([[0, 1, 0], [-1, 0, 0], [0, 0, 0]]);
        let anti = Axis::new(vec![1, -1]).unwrap();
        assert_eq!(
            extract_line(&grid, &[1, 0], &anti).unwrap(),
            vec![Cell::Agent, Cell::Opponent]
        );
    }

    #[test]
    fn test_extract_line_3d_space_diagonal() {
        let mut grid = Grid::new(3, 3).unwrap();
        for i in 0..3 {
            grid.set(&[i, i, i], Cell::Agent).unwrap();
        }
        let axis = Axis::new(vec![1, 1, 1]).unwrap();
        assert_eq!(
            extract_line(&grid, &[2, 2, 2], &axis).unwrap(),
            vec![Cell::Agent; 3]
        );
    }

    #[test]
    fn test_extract_line_rejects_bad_input() {
        let grid = Grid::new(3, 2).unwrap();
        let axis = Axis::new(vec![1, 0]).unwrap();
        assert!(extract_line(&grid, &[3, 0], &axis).is_err());
        let axis_3d = Axis::new(vec![1, 0, 0]).unwrap();
        assert!(extract_line(&grid, &[0, 0], &axis_3d).is_err());
    }

    #[test]
    fn test_has_run() {
        use Cell::{Agent as A, Empty as E, Opponent as O};
        assert!(has_run(&[A, A, A, E, O], A, 3).unwrap());
        assert!(!has_run(&[A, A, E, A, A], A, 3).unwrap());
        assert!(!has_run(&[], A, 1).unwrap());
        assert!(!has_run(&[A, A, O, A], A, 3).unwrap());
        assert!(has_run(&[O, O], O, 2).unwrap());
    }

    #[test]
    fn test_has_run_rejects_invalid_input() {
        assert_eq!(
            has_run(&[Cell::Agent], Cell::Agent, 0),
            Err(GeometryError::InvalidRunLength(0))
        );
        assert_eq!(
            has_run(&[Cell::Empty], Cell::Empty, 1),
            Err(GeometryError::EmptyTarget)
        );
    }

    #[test]
    fn test_row_win_depends_on_connect_n() {
        let grid = grid_2d([[1, 1, 1], [0, -1, 0], [-1, 0, 0]]);
        assert!(is_winning_move(&grid, &[0, 2], 3).unwrap());
        assert!(!is_winning_move(&grid, &[0, 2], 4).unwrap());
    }

    #[test]
    fn test_no_win_for_other_symbol() {
        let grid = grid_2d([[1, 1, -1], [0, -1, 0], [0, 0, 0]]);
        assert!(!is_winning_move(&grid, &[0, 2], 3).unwrap());
        assert!(is_winning_move(&grid, &[1, 1], 2).unwrap());
    }

    #[test]
    fn test_winning_move_requires_symbol() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(
            is_winning_move(&grid, &[0, 0], 3),
            Err(GeometryError::EmptyCell(vec![0, 0]))
        );
    }

    #[test]
    fn test_oracle_validates_shape() {
        assert!(WinOracle::new(3, 2, 4).is_err());
        assert!(WinOracle::new(3, 2, 0).is_err());
        assert!(WinOracle::new(3, 0, 3).is_err());
        assert!(WinOracle::new(0, 2, 1).is_err());
        assert_eq!(WinOracle::new(3, 2, 3).unwrap().axes().len(), 4);
    }

    #[test]
    fn test_oracle_detects_anti_diagonal_win() {
        let oracle = WinOracle::new(3, 2, 3).unwrap();
        let grid = grid_2d([[0, 0, -1], [1, -1, 0], [-1, 1, 1]]);
        assert!(oracle.is_winning_move(&grid, &[1, 1]).unwrap());
        assert!(!oracle.is_winning_move(&grid, &[2, 2]).unwrap());
    }

    #[test]
    fn test_oracle_3d_win_across_layers() {
        let oracle = WinOracle::new(3, 3, 3).unwrap();
        let mut grid = Grid::new(3, 3).unwrap();
        for layer in 0..3 {
            grid.set(&[layer, 2 - layer, 1], Cell::Opponent).unwrap();
        }
        assert!(oracle.is_winning_move(&grid, &[0, 2, 1]).unwrap());
    }

    #[test]
    fn test_oracle_rejects_mismatched_grid() {
        let oracle = WinOracle::new(3, 2, 3).unwrap();
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(&[0, 0, 0], Cell::Agent).unwrap();
        assert!(oracle.is_winning_move(&grid, &[0, 0, 0]).is_err());
    }
}
