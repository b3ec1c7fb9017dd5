//! Errors surfaced by the host binary.

use holdout_core::error::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to serialize snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
