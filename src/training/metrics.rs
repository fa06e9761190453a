use std::collections::VecDeque;

use crate::game::{GameOutcome, Player};

/// Result of a single episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeResult {
    pub outcome: GameOutcome,
    pub total_reward: f32,
    /// Environment steps taken, including penalized retries.
    pub steps: usize,
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
    total_reward: f64,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
            total_reward: 0.0,
        }
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        self.total_reward += f64::from(result.total_reward);
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    fn rate(&self, last_n: usize, outcome: GameOutcome) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|r| r.outcome == outcome)
            .count();
        hits as f32 / n as f32
    }

    /// Agent win rate in the last N episodes.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, GameOutcome::Winner(Player::Agent))
    }

    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, GameOutcome::Winner(Player::Opponent))
    }

    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, GameOutcome::Draw)
    }

    /// Average episodic reward over the last N episodes.
    pub fn average_reward(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.total_reward)
            .sum();
        sum / n as f32
    }

    /// Average number of steps over the last N episodes.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.steps)
            .sum();
        total as f32 / n as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Sum of episodic rewards over the whole run.
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn lifetime_average_reward(&self) -> f64 {
        if self.total_episodes == 0 {
            return 0.0;
        }
        self.total_reward / self.total_episodes as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: GameOutcome, steps: usize) -> EpisodeResult {
        EpisodeResult {
            outcome,
            total_reward: outcome.reward(),
            steps,
        }
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = TrainingMetrics::with_capacity(100);
        assert_eq!(metrics.win_rate(10), 0.0);
        assert_eq!(metrics.average_reward(10), 0.0);
        assert_eq!(metrics.lifetime_average_reward(), 0.0);
    }

    #[test]
    fn test_rates_over_window() {
        let mut metrics = TrainingMetrics::with_capacity(100);
        metrics.record_episode(result(GameOutcome::Winner(Player::Agent), 3));
        metrics.record_episode(result(GameOutcome::Winner(Player::Opponent), 4));
        metrics.record_episode(result(GameOutcome::Draw, 5));
        metrics.record_episode(result(GameOutcome::Winner(Player::Agent), 4));

        assert_eq!(metrics.win_rate(4), 0.5);
        assert_eq!(metrics.loss_rate(4), 0.25);
        assert_eq!(metrics.draw_rate(4), 0.25);
        // Last two only: draw and win.
        assert_eq!(metrics.win_rate(2), 0.5);
        assert_eq!(metrics.loss_rate(2), 0.0);
        assert_eq!(metrics.average_game_length(2), 4.5);
        assert_eq!(metrics.average_reward(4), 0.25);
    }

    #[test]
    fn test_capacity_caps_window_but_not_totals() {
        let mut metrics = TrainingMetrics::with_capacity(2);
        for _ in 0..5 {
            metrics.record_episode(result(GameOutcome::Winner(Player::Agent), 3));
        }
        metrics.record_episode(result(GameOutcome::Winner(Player::Opponent), 3));
        assert_eq!(metrics.total_episodes(), 6);
        assert_eq!(metrics.total_reward(), 4.0);
        assert_eq!(metrics.win_rate(100), 0.5);
        assert!((metrics.lifetime_average_reward() - 4.0 / 6.0).abs() < 1e-9);
    }
}
