use crate::error::AgentError;
use crate::game::Grid;

/// A single transition fed to a learning agent.
#[derive(Debug, Clone)]
pub struct Experience {
    pub observation: Grid,
    pub action: usize,
    pub reward: f32,
    pub next_observation: Grid,
    pub done: bool,
}

/// Interface shared by the learning agent and the random opponent.
pub trait Agent {
    /// Select a cell (linear index) to play on the given observation.
    fn select_action(&mut self, observation: &Grid) -> Result<usize, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Learn from a single transition. Non-learning agents ignore it.
    fn update(&mut self, _experience: &Experience) -> Result<(), AgentError> {
        Ok(())
    }
}
