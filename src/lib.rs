//! # ML Tic-Tac-Toe
//!
//! Tic-tac-toe generalized to `size`^`dimension` boards with a configurable
//! win length, and a tabular Q-learning agent that learns it by playing a
//! uniformly random opponent.
//!
//! ## Modules
//!
//! - [`game`]: Grid storage, dimension-agnostic win detection, environment
//! - [`ai`]: Agent trait, Q-learning agent and table store, random opponent
//! - [`training`]: Episode driver, rolling metrics, trainer
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
