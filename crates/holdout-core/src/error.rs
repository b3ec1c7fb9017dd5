//! Error types for rejected player actions and configuration loading.

use thiserror::Error;

/// Why a build or upgrade request was turned down.
///
/// A rejection never mutates world state; the caller decides whether to
/// re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum RejectReason {
    /// Not enough money or resources for the cost.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Another structure already occupies the target cell.
    #[error("cell is occupied")]
    CellOccupied,
    /// Generator limit reached.
    #[error("generator cap reached")]
    CapReached,
    /// Turret has no upgrade tier left.
    #[error("turret is already at max level")]
    MaxLevel,
    /// Upgrade target cell holds no turret.
    #[error("no turret at target cell")]
    NoTurret,
    /// Choice index is outside the tier's choices.
    #[error("unknown upgrade choice")]
    UnknownChoice,
}

/// Failure to load a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
