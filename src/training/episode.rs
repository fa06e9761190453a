use crate::ai::{Agent, Experience, QLearningAgent, QStore};
use crate::error::TrainingError;
use crate::game::{GameOutcome, Player, TicTacToeEnv};
use crate::training::metrics::EpisodeResult;

/// Play one episode against the environment's opponent, feeding every
/// transition back to the agent.
pub fn play_training_episode(
    agent: &mut dyn Agent,
    env: &mut TicTacToeEnv,
    seed: Option<u64>,
) -> Result<EpisodeResult, TrainingError> {
    let mut observation = env.reset(seed).clone();
    let mut total_reward = 0.0;
    let mut steps = 0;

    loop {
        let action = agent.select_action(&observation)?;
        let step = env.step(action)?;
        steps += 1;
        total_reward += step.reward;

        agent.update(&Experience {
            observation,
            action,
            reward: step.reward,
            next_observation: step.observation.clone(),
            done: step.done,
        })?;

        if let Some(outcome) = step.outcome {
            return Ok(EpisodeResult {
                outcome,
                total_reward,
                steps,
            });
        }
        observation = step.observation;
    }
}

/// Play a single game without learning.
pub fn play_eval_game(
    agent: &mut dyn Agent,
    env: &mut TicTacToeEnv,
    seed: Option<u64>,
) -> Result<GameOutcome, TrainingError> {
    env.reset(seed);
    loop {
        let action = agent.select_action(env.grid())?;
        if let Some(outcome) = env.step(action)?.outcome {
            return Ok(outcome);
        }
    }
}

/// Greedy win rate against the random opponent over `games` games.
///
/// Exploration is switched off for the duration and restored afterwards.
pub fn evaluate<S: QStore>(
    agent: &mut QLearningAgent<S>,
    env: &mut TicTacToeEnv,
    games: usize,
    base_seed: Option<u64>,
) -> Result<f32, TrainingError> {
    if games == 0 {
        return Ok(0.0);
    }
    let saved_epsilon = agent.epsilon();
    agent.set_epsilon(0.0);

    let mut wins = 0;
    let mut result = Ok(());
    for game_idx in 0..games {
        let seed = base_seed.map(|s| episode_seed(s, game_idx));
        match play_eval_game(agent, env, seed) {
            Ok(GameOutcome::Winner(Player::Agent)) => wins += 1,
            Ok(_) => {}
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    agent.set_epsilon(saved_epsilon);
    result.map(|_| wins as f32 / games as f32)
}

/// Derive a deterministic seed for a given episode index.
pub fn episode_seed(base_seed: u64, episode_index: usize) -> u64 {
    // FNV-1a-inspired mixing for deterministic, well-distributed seeds
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = episode_index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}
