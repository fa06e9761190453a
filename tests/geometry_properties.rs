//! Property-based tests for the dimension-agnostic win oracle.

use std::collections::HashSet;

use ml_tic_tac_toe::game::{axis_directions, extract_line, has_run, is_winning_move, Cell, Grid};
use proptest::prelude::*;

/// Board shapes small enough to enumerate: size 1..=4, dimension 1..=4.
fn arb_shape() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=4, 1usize..=4)
}

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![Just(Cell::Empty), Just(Cell::Agent), Just(Cell::Opponent)]
}

/// A random grid plus a random linear index into it.
fn arb_grid_and_index() -> impl Strategy<Value = (Grid, usize)> {
    arb_shape().prop_flat_map(|(size, dimension)| {
        let len = size.pow(dimension as u32);
        (prop::collection::vec(arb_cell(), len), 0..len).prop_map(move |(cells, index)| {
            (Grid::from_cells(size, dimension, cells).unwrap(), index)
        })
    })
}

fn arb_sequence() -> impl Strategy<Value = Vec<Cell>> {
    prop::collection::vec(arb_cell(), 0..12)
}

/// Reference run check: longest streak of `target`.
fn longest_run(sequence: &[Cell], target: Cell) -> usize {
    let mut best = 0;
    let mut current = 0;
    for &cell in sequence {
        if cell == target {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

proptest! {
    #[test]
    fn prop_axis_count_and_uniqueness(dimension in 1usize..=6) {
        let axes = axis_directions(dimension).unwrap();
        prop_assert_eq!(axes.len(), (3usize.pow(dimension as u32) - 1) / 2);

        let seen: HashSet<Vec<i8>> = axes.iter().map(|a| a.components().to_vec()).collect();
        prop_assert_eq!(seen.len(), axes.len());
        for axis in &axes {
            prop_assert!(axis.components().iter().any(|&c| c != 0));
            let negation = axis.negated().components().to_vec();
            prop_assert!(!seen.contains(&negation));
        }
    }

    #[test]
    fn prop_line_contains_cell_and_is_bounded((grid, index) in arb_grid_and_index()) {
        let coords = grid.coords_of(index).unwrap();
        for axis in axis_directions(grid.dimension()).unwrap() {
            let line = extract_line(&grid, &coords, &axis).unwrap();
            prop_assert!(!line.is_empty());
            prop_assert!(line.len() <= grid.size());

            // Same line, in reverse, from the opposite direction.
            let mut reversed = extract_line(&grid, &coords, &axis.negated()).unwrap();
            reversed.reverse();
            prop_assert_eq!(&line, &reversed);
        }
    }

    #[test]
    fn prop_line_is_independent_of_query_cell((grid, index) in arb_grid_and_index()) {
        let coords = grid.coords_of(index).unwrap();
        for axis in axis_directions(grid.dimension()).unwrap() {
            let line = extract_line(&grid, &coords, &axis).unwrap();
            // Step once along the axis; if still on the board the line is unchanged.
            let neighbour: Option<Vec<usize>> = coords
                .iter()
                .zip(axis.components())
                .map(|(&c, &a)| {
                    let next = c as isize + a as isize;
                    (0..grid.size() as isize).contains(&next).then_some(next as usize)
                })
                .collect();
            if let Some(neighbour) = neighbour {
                prop_assert_eq!(&extract_line(&grid, &neighbour, &axis).unwrap(), &line);
            }
        }
    }

    #[test]
    fn prop_has_run_matches_longest_streak(sequence in arb_sequence(), n in 1usize..6) {
        for target in [Cell::Agent, Cell::Opponent] {
            prop_assert_eq!(
                has_run(&sequence, target, n).unwrap(),
                longest_run(&sequence, target) >= n
            );
        }
    }

    #[test]
    fn prop_connect_one_always_wins((grid, index) in arb_grid_and_index()) {
        let coords = grid.coords_of(index).unwrap();
        let mut grid = grid;
        grid.set(&coords, Cell::Agent).unwrap();
        prop_assert!(is_winning_move(&grid, &coords, 1).unwrap());
    }

    #[test]
    fn prop_run_longer_than_board_never_wins((grid, index) in arb_grid_and_index()) {
        let coords = grid.coords_of(index).unwrap();
        let mut grid = grid;
        grid.set(&coords, Cell::Opponent).unwrap();
        let too_long = grid.size() + 1;
        prop_assert!(!is_winning_move(&grid, &coords, too_long).unwrap());
    }

    #[test]
    fn prop_full_row_wins((size, dimension) in arb_shape(), fixed in 0usize..4) {
        // Fill the line along the last axis through (fixed, ..., fixed, *).
        let fixed = fixed % size;
        let mut grid = Grid::new(size, dimension).unwrap();
        let mut coords = vec![fixed; dimension];
        for i in 0..size {
            coords[dimension - 1] = i;
            grid.set(&coords, Cell::Agent).unwrap();
        }
        prop_assert!(is_winning_move(&grid, &coords, size).unwrap());
    }
}
