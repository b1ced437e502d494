use thiserror::Error;

use super::config::ConfigError;
use super::scene::SceneError;
use crate::core::models::chain::ChainError;
use crate::core::models::residue::ResidueError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid sequence: {source}")]
    Residue {
        #[from]
        source: ResidueError,
    },

    #[error("Degenerate chain: {source}")]
    Chain {
        #[from]
        source: ChainError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Scene synchronization failed: {source}")]
    Scene {
        #[from]
        source: SceneError,
    },
}
