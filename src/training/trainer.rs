use crate::ai::{QLearningAgent, QStore};
use crate::error::TrainingError;
use crate::game::TicTacToeEnv;
use crate::training::episode::{episode_seed, evaluate, play_training_episode};
use crate::training::metrics::TrainingMetrics;

/// Trainer configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_episodes: usize,
    pub log_interval: usize,
    /// Run a greedy evaluation every this many episodes; 0 disables it.
    pub eval_interval: usize,
    pub eval_games: usize,
    /// Base seed for the opponent's per-episode seeds; `None` keeps one
    /// OS-seeded opponent for the whole run.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 1000,
            log_interval: 100,
            eval_interval: 500,
            eval_games: 100,
            seed: None,
        }
    }
}

/// Outcome of a full training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub total_reward: f64,
    pub average_reward: f64,
    pub final_win_rate: f32,
    pub states_learned: usize,
}

/// Trains a Q-learning agent against the environment's random opponent.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Run the full training loop.
    pub fn train<S: QStore>(
        &self,
        agent: &mut QLearningAgent<S>,
        env: &mut TicTacToeEnv,
    ) -> Result<TrainingSummary, TrainingError> {
        let mut metrics = TrainingMetrics::with_capacity(self.config.log_interval.max(1));
        let end_episode = self.config.num_episodes;

        tracing::info!(
            episodes = end_episode,
            size = env.config().size,
            dimension = env.config().dimension,
            connect_n = env.config().connect_n,
            "starting Q-learning training"
        );

        for episode in 1..=end_episode {
            let seed = self.config.seed.map(|s| episode_seed(s, episode));
            let result = play_training_episode(agent, env, seed)?;
            tracing::debug!(
                episode,
                reward = result.total_reward,
                steps = result.steps,
                "episode finished"
            );
            metrics.record_episode(result);

            if self.config.log_interval > 0 && episode % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                tracing::info!(
                    "Episode {}/{} | eps: {:.3} | avg_reward({}): {:.3} | win: {:.1}% | loss: {:.1}% | draw: {:.1}% | avg_len: {:.1} | states: {}",
                    episode,
                    end_episode,
                    agent.epsilon(),
                    window,
                    metrics.average_reward(window),
                    metrics.win_rate(window) * 100.0,
                    metrics.loss_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.average_game_length(window),
                    agent.state_count(),
                );
            }

            if self.config.eval_interval > 0 && episode % self.config.eval_interval == 0 {
                let eval_wr = self.evaluate(agent, env)?;
                tracing::info!(
                    "  >> Eval vs Random ({} games): {:.1}% win rate",
                    self.config.eval_games,
                    eval_wr * 100.0
                );
            }
        }

        let final_win_rate = self.evaluate(agent, env)?;
        tracing::info!(
            "Training complete. Total episodes: {}",
            metrics.total_episodes()
        );

        Ok(TrainingSummary {
            episodes: metrics.total_episodes(),
            total_reward: metrics.total_reward(),
            average_reward: metrics.lifetime_average_reward(),
            final_win_rate,
            states_learned: agent.state_count(),
        })
    }

    /// Greedy win rate against the random opponent over `eval_games`.
    pub fn evaluate<S: QStore>(
        &self,
        agent: &mut QLearningAgent<S>,
        env: &mut TicTacToeEnv,
    ) -> Result<f32, TrainingError> {
        // Offset keeps evaluation seeds apart from training seeds.
        let base = self.config.seed.map(|s| s.wrapping_add(1));
        evaluate(agent, env, self.config.eval_games, base)
    }
}
