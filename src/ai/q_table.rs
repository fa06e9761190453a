//! Storage behind the Q-learning agent's table.
//!
//! The agent only talks to [`QStore`], so the unbounded hash map used for
//! small boards can be swapped for a bounded or disk-backed store without
//! touching the learning rule.

use std::collections::HashMap;

use super::state_encoding::StateKey;

/// Per-state action values, indexed by action.
pub type ActionValues = Vec<f32>;

pub trait QStore {
    fn get(&self, state: &StateKey) -> Option<&ActionValues>;

    fn get_mut(&mut self, state: &StateKey) -> Option<&mut ActionValues>;

    fn put(&mut self, state: StateKey, values: ActionValues);

    /// Number of states recorded.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, state: &StateKey) -> bool {
        self.get(state).is_some()
    }
}

/// Unbounded in-memory store. Grows for the lifetime of the agent.
#[derive(Debug, Clone, Default)]
pub struct HashMapStore {
    table: HashMap<StateKey, ActionValues>,
}

impl HashMapStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QStore for HashMapStore {
    fn get(&self, state: &StateKey) -> Option<&ActionValues> {
        self.table.get(state)
    }

    fn get_mut(&mut self, state: &StateKey) -> Option<&mut ActionValues> {
        self.table.get_mut(state)
    }

    fn put(&mut self, state: StateKey, values: ActionValues) {
        self.table.insert(state, values);
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}
