use crate::ai::{Agent, RandomAgent};
use crate::error::{EnvError, GeometryError};

use super::geometry::WinOracle;
use super::grid::Grid;
use super::player::Player;

/// Board shape and win length.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
    pub dimension: usize,
    pub connect_n: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: 3,
            dimension: 2,
            connect_n: 3,
        }
    }
}

impl GameConfig {
    /// Number of cells, which is also the number of actions.
    pub fn cell_count(&self) -> Result<usize, GeometryError> {
        Grid::new(self.size, self.dimension).map(|g| g.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

impl GameOutcome {
    /// Terminal reward from the agent's point of view.
    pub fn reward(self) -> f32 {
        match self {
            GameOutcome::Winner(Player::Agent) => 1.0,
            GameOutcome::Winner(Player::Opponent) => -1.0,
            GameOutcome::Draw => 0.0,
        }
    }
}

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Grid,
    pub reward: f32,
    pub done: bool,
    pub outcome: Option<GameOutcome>,
    pub opponent_action: Option<usize>,
}

/// Single-agent environment: the agent plays `Cell::Agent`, then a uniformly
/// random opponent answers within the same step.
pub struct TicTacToeEnv {
    config: GameConfig,
    grid: Grid,
    oracle: WinOracle,
    opponent: RandomAgent,
    done: bool,
}

impl TicTacToeEnv {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, GeometryError> {
        let oracle = WinOracle::new(config.size, config.dimension, config.connect_n)?;
        let grid = Grid::new(config.size, config.dimension)?;
        let opponent = match seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        };
        Ok(TicTacToeEnv {
            config,
            grid,
            oracle,
            opponent,
            done: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current observation.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn action_count(&self) -> usize {
        self.grid.len()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Clear the board. A seed makes the opponent's moves reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> &Grid {
        if let Some(seed) = seed {
            self.opponent = RandomAgent::with_seed(seed);
        }
        self.grid.clear();
        self.done = false;
        &self.grid
    }

    /// Play the agent's move at linear index `action`, then the opponent's reply.
    ///
    /// An occupied cell costs -1 and leaves the board untouched so the caller
    /// can choose again.
    pub fn step(&mut self, action: usize) -> Result<Step, EnvError> {
        if self.done {
            return Err(EnvError::GameOver);
        }
        let actions = self.action_count();
        if action >= actions {
            return Err(EnvError::ActionOutOfRange { action, actions });
        }

        if self.grid.cell_at(action).is_some_and(|c| !c.is_empty()) {
            tracing::debug!(action, "agent chose an occupied cell");
            return Ok(Step {
                observation: self.grid.clone(),
                reward: -1.0,
                done: false,
                outcome: None,
                opponent_action: None,
            });
        }

        if let Some(outcome) = self.place(action, Player::Agent)? {
            return Ok(self.finish(outcome, None));
        }

        let reply = self.opponent.select_action(&self.grid)?;
        if let Some(outcome) = self.place(reply, Player::Opponent)? {
            return Ok(self.finish(outcome, Some(reply)));
        }

        Ok(Step {
            observation: self.grid.clone(),
            reward: 0.0,
            done: false,
            outcome: None,
            opponent_action: Some(reply),
        })
    }

    /// Place a symbol and report whether the game ended on it.
    fn place(&mut self, action: usize, player: Player) -> Result<Option<GameOutcome>, EnvError> {
        self.grid.set_at(action, player.to_cell())?;
        let coords = self.grid.coords_of(action)?;
        tracing::debug!("{}: {}\n{}", player.name(), action, self.grid);

        if self.oracle.is_winning_move(&self.grid, &coords)? {
            Ok(Some(GameOutcome::Winner(player)))
        } else if self.grid.is_full() {
            Ok(Some(GameOutcome::Draw))
        } else {
            Ok(None)
        }
    }

    fn finish(&mut self, outcome: GameOutcome, opponent_action: Option<usize>) -> Step {
        self.done = true;
        Step {
            observation: self.grid.clone(),
            reward: outcome.reward(),
            done: true,
            outcome: Some(outcome),
            opponent_action,
        }
    }
}
