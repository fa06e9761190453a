use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AgentError;
use crate::game::Grid;

use super::agent::{Agent, Experience};
use super::q_table::{ActionValues, HashMapStore, QStore};
use super::state_encoding::{encode_observation, EncodedObservation, StateKey};

/// Which next-state actions the TD target maximizes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapTarget {
    /// Every recorded action, including cells already taken in the next state.
    #[default]
    AllActions,
    /// Only the next state's empty cells.
    LegalOnly,
}

/// Tabular Q-learning hyperparameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Step size, in (0, 1].
    pub alpha: f32,
    /// Exploration probability, in [0, 1].
    pub epsilon: f32,
    /// Discount factor, in [0, 1].
    pub gamma: f32,
    pub bootstrap: BootstrapTarget,
    /// Seed for exploration draws; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        QLearningConfig {
            alpha: 0.1,
            epsilon: 0.1,
            gamma: 0.9,
            bootstrap: BootstrapTarget::AllActions,
            seed: None,
        }
    }
}

impl QLearningConfig {
    pub fn validate(&self) -> Result<(), AgentError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(AgentError::InvalidConfig(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(AgentError::InvalidConfig(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(AgentError::InvalidConfig(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        Ok(())
    }
}

/// Epsilon-greedy tabular Q-learning agent.
///
/// The table is only reachable through [`choose_action`](Self::choose_action),
/// [`learn`](Self::learn) and [`ensure_state`](Self::ensure_state); the
/// accessors below are read-only.
pub struct QLearningAgent<S: QStore = HashMapStore> {
    table: S,
    config: QLearningConfig,
    epsilon: f32,
    rng: StdRng,
}

impl QLearningAgent<HashMapStore> {
    pub fn new(config: QLearningConfig) -> Result<Self, AgentError> {
        Self::with_store(config, HashMapStore::new())
    }
}

impl<S: QStore> QLearningAgent<S> {
    pub fn with_store(config: QLearningConfig, table: S) -> Result<Self, AgentError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(QLearningAgent {
            table,
            epsilon: config.epsilon,
            config,
            rng,
        })
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Override the exploration rate, e.g. 0.0 for greedy evaluation.
    pub fn set_epsilon(&mut self, epsilon: f32) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    /// Number of distinct states seen so far.
    pub fn state_count(&self) -> usize {
        self.table.len()
    }

    /// Recorded value, or 0.0 for anything not yet seen.
    pub fn q_value(&self, state: &StateKey, action: usize) -> f32 {
        self.table
            .get(state)
            .and_then(|values| values.get(action).copied())
            .unwrap_or(0.0)
    }

    pub fn q_values(&self, state: &StateKey) -> Option<&[f32]> {
        self.table.get(state).map(|values| values.as_slice())
    }

    /// Insert `state` with every action valued 0.0 if it is not yet known.
    pub fn ensure_state(
        &mut self,
        state: &StateKey,
        action_count: usize,
    ) -> Result<(), AgentError> {
        self.values_mut(state, action_count).map(|_| ())
    }

    fn values_mut(
        &mut self,
        state: &StateKey,
        action_count: usize,
    ) -> Result<&mut ActionValues, AgentError> {
        if !self.table.contains(state) {
            self.table.put(state.clone(), vec![0.0; action_count]);
        }
        let values = self
            .table
            .get_mut(state)
            .ok_or(AgentError::StateActionMismatch {
                expected: action_count,
                actual: 0,
            })?;
        if values.len() != action_count {
            return Err(AgentError::StateActionMismatch {
                expected: values.len(),
                actual: action_count,
            });
        }
        Ok(values)
    }

    /// Epsilon-greedy choice among the empty cells of `observation`.
    ///
    /// Greedy ties go to the lowest cell index.
    pub fn choose_action(&mut self, observation: &Grid) -> Result<usize, AgentError> {
        let EncodedObservation { key, legal_actions } = encode_observation(observation);
        let values = self.values_mut(&key, observation.len())?;
        if legal_actions.is_empty() {
            return Err(AgentError::NoLegalAction);
        }

        let mut best = legal_actions[0];
        for &action in &legal_actions[1..] {
            if values[action] > values[best] {
                best = action;
            }
        }

        if self.rng.random_range(0.0f32..1.0) < self.epsilon {
            let idx = self.rng.random_range(0..legal_actions.len());
            return Ok(legal_actions[idx]);
        }
        Ok(best)
    }

    /// One-step TD update of `Q[observation][action]`.
    pub fn learn(
        &mut self,
        observation: &Grid,
        action: usize,
        reward: f32,
        next_observation: &Grid,
        done: bool,
    ) -> Result<(), AgentError> {
        let actions = observation.len();
        if next_observation.len() != actions {
            return Err(AgentError::StateActionMismatch {
                expected: actions,
                actual: next_observation.len(),
            });
        }
        if action >= actions {
            return Err(AgentError::ActionOutOfRange { action, actions });
        }

        let state = encode_observation(observation);
        let next = encode_observation(next_observation);

        let QLearningConfig {
            alpha,
            gamma,
            bootstrap,
            ..
        } = self.config;
        let next_values = self.values_mut(&next.key, actions)?;
        let max_next_q = if done {
            0.0
        } else {
            match bootstrap {
                BootstrapTarget::AllActions => max_value(next_values.iter().copied()),
                BootstrapTarget::LegalOnly => {
                    max_value(next.legal_actions.iter().map(|&a| next_values[a]))
                }
            }
        };

        let values = self.values_mut(&state.key, actions)?;
        let q = &mut values[action];
        *q += alpha * (reward + gamma * max_next_q - *q);
        Ok(())
    }
}

/// Maximum of the values, or 0.0 when there are none.
fn max_value(values: impl Iterator<Item = f32>) -> f32 {
    values.reduce(f32::max).unwrap_or(0.0)
}

impl<S: QStore> Agent for QLearningAgent<S> {
    fn select_action(&mut self, observation: &Grid) -> Result<usize, AgentError> {
        self.choose_action(observation)
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn update(&mut self, experience: &Experience) -> Result<(), AgentError> {
        self.learn(
            &experience.observation,
            experience.action,
            experience.reward,
            &experience.next_observation,
            experience.done,
        )
    }
}
