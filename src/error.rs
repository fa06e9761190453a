use std::path::PathBuf;

/// Contract violations in grid geometry and win detection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("dimension must be >= 1, got {0}")]
    InvalidDimension(usize),

    #[error("board size must be >= 1, got {0}")]
    InvalidSize(usize),

    #[error("invalid run length {0} (must be at least 1 and at most the board size)")]
    InvalidRunLength(usize),

    #[error("run target must be a placed symbol, not an empty cell")]
    EmptyTarget,

    #[error("coordinates {coords:?} out of bounds for board size {size}")]
    CoordinateOutOfBounds { coords: Vec<usize>, size: usize },

    #[error("cell index {index} out of bounds ({cells} cells)")]
    IndexOutOfBounds { index: usize, cells: usize },

    #[error("expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid axis vector {0:?}")]
    InvalidAxis(Vec<i8>),

    #[error("no symbol placed at {0:?}")]
    EmptyCell(Vec<usize>),
}

/// Errors raised by agents when asked to act or learn outside their contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    #[error("no legal action available (grid is full)")]
    NoLegalAction,

    #[error(
        "observation has {actual} cells but the state was initialized with {expected} actions"
    )]
    StateActionMismatch { expected: usize, actual: usize },

    #[error("action {action} out of range ({actions} actions)")]
    ActionOutOfRange { action: usize, actions: usize },

    #[error("invalid agent config: {0}")]
    InvalidConfig(String),
}

/// Errors returned by the environment's step logic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvError {
    #[error("action {action} out of range ({actions} cells)")]
    ActionOutOfRange { action: usize, actions: usize },

    #[error("episode is over; call reset before stepping again")]
    GameOver,

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("opponent error: {0}")]
    Opponent(#[from] AgentError),
}

/// Errors that can occur during training.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainingError {
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("environment error: {0}")]
    Env(#[from] EnvError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
