use thiserror::Error;

use crate::core::types::Side;

#[derive(Error, Debug)]
pub enum WarError {
    #[error("Unit not found: {0}")]
    UnknownUnit(String),

    #[error("Unit is dead: {0}")]
    DeadUnit(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Unit {unit} is not commanded by {side}")]
    NotCommanded { unit: String, side: Side },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WarError>;
