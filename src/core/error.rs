use thiserror::Error;

use crate::core::types::Coord;

#[derive(Error, Debug)]
pub enum ConquestError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("No route from {from} to {to}")]
    Unreachable { from: Coord, to: Coord },

    #[error("Coordinate out of bounds: {0}")]
    OutOfBounds(Coord),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ConquestError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidCommand(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ConquestError>;
