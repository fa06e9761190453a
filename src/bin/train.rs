use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ml_tic_tac_toe::ai::QLearningAgent;
use ml_tic_tac_toe::config::AppConfig;
use ml_tic_tac_toe::game::TicTacToeEnv;
use ml_tic_tac_toe::training::trainer::Trainer;

/// Train a Q-learning agent on N-dimensional tic-tac-toe against a random opponent.
#[derive(Parser)]
#[command(name = "train", about = "Train a tabular Q-learning tic-tac-toe agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of training episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    alpha: Option<f32>,

    /// Override exploration rate
    #[arg(long)]
    epsilon: Option<f32>,

    /// Override discount factor
    #[arg(long)]
    gamma: Option<f32>,

    /// Override cells per axis
    #[arg(long)]
    size: Option<usize>,

    /// Override number of axes
    #[arg(long)]
    dimension: Option<usize>,

    /// Override symbols in a row needed to win
    #[arg(long)]
    connect_n: Option<usize>,

    /// Seed agent exploration and the opponent for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(episodes) = cli.episodes {
        config.training.num_episodes = episodes;
    }
    if let Some(alpha) = cli.alpha {
        config.agent.alpha = alpha;
    }
    if let Some(epsilon) = cli.epsilon {
        config.agent.epsilon = epsilon;
    }
    if let Some(gamma) = cli.gamma {
        config.agent.gamma = gamma;
    }
    if let Some(size) = cli.size {
        config.game.size = size;
    }
    if let Some(dimension) = cli.dimension {
        config.game.dimension = dimension;
    }
    if let Some(connect_n) = cli.connect_n {
        config.game.connect_n = connect_n;
    }
    if let Some(seed) = cli.seed {
        config.agent.seed = Some(seed);
        config.training.seed = Some(seed);
    }
    config.validate().context("validating configuration")?;

    let mut agent =
        QLearningAgent::new(config.agent.clone()).context("creating Q-learning agent")?;
    let mut env = TicTacToeEnv::new(config.game.clone(), config.training.seed)
        .context("creating environment")?;

    let summary = Trainer::new(config.training.clone())
        .train(&mut agent, &mut env)
        .context("training")?;

    println!("-------------------------------------------");
    println!("Average reward: {:.4}", summary.average_reward);
    println!("Total reward: {}", summary.total_reward);
    println!(
        "Final eval vs Random: {:.1}% win rate",
        summary.final_win_rate * 100.0
    );
    println!("States learned: {}", summary.states_learned);
    Ok(())
}
