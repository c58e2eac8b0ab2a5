use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No map type configured for map: {0}")]
    UnknownMap(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No player data could be loaded. Check the data directory and file names.")]
    NoPlayerData,
}

pub type AppResult<T> = Result<T, AppError>;
