//! Errors surfaced by the runtime.

use game_core::{ConfigError, ErrorSeverity, GameError};
use thiserror::Error;

use crate::enemy::EnemyHandle;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum RuntimeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("cost grid uses {actual}-unit tiles but the configuration expects {expected}")]
    TileSizeMismatch { expected: f32, actual: f32 },

    #[error("{0} is not an active enemy")]
    UnknownEnemy(EnemyHandle),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidConfig(_) | Self::TileSizeMismatch { .. } => ErrorSeverity::Validation,
            Self::UnknownEnemy(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
            Self::TileSizeMismatch { .. } => "RUNTIME_TILE_SIZE_MISMATCH",
            Self::UnknownEnemy(_) => "RUNTIME_UNKNOWN_ENEMY",
        }
    }
}
