use thiserror::Error;

/// Faults at the edges of the game: loading data, talking to the terminal.
///
/// Gameplay outcomes (blocked punches, knockouts) are never errors.
#[derive(Error, Debug)]
pub enum RingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid boss catalog: {0}")]
    InvalidCatalog(String),

    #[error("Input channel closed")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, RingError>;
