mod agent;
pub mod q_learning;
pub mod q_table;
mod random;
pub mod state_encoding;

pub use agent::{Agent, Experience};
pub use q_learning::{BootstrapTarget, QLearningAgent, QLearningConfig};
pub use q_table::{HashMapStore, QStore};
pub use random::RandomAgent;
pub use state_encoding::{encode_observation, EncodedObservation, StateKey};
