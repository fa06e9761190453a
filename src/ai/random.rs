use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::error::AgentError;
use crate::game::Grid;

use super::agent::Agent;

/// An agent that selects uniformly at random from empty cells.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, observation: &Grid) -> Result<usize, AgentError> {
        observation
            .empty_cells()
            .choose(&mut self.rng)
            .copied()
            .ok_or(AgentError::NoLegalAction)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
