//! Core N-dimensional tic-tac-toe logic: grid storage, dimension-agnostic
//! win detection, players, and the single-agent environment.

mod env;
pub mod geometry;
mod grid;
mod player;

pub use env::{GameConfig, GameOutcome, Step, TicTacToeEnv};
pub use geometry::{axis_directions, extract_line, has_run, is_winning_move, Axis, WinOracle};
pub use grid::{Cell, Grid};
pub use player::Player;
