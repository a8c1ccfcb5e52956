use thiserror::Error;

use crate::core::types::SpeciesId;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(SpeciesId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
