//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from battle construction and repositories so callers can
//! bubble them up with consistent context.

use battle_core::{BattleError, ErrorSeverity, SetupError};
use thiserror::Error;

use crate::session::BattleId;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("battle {0} not found")]
    BattleNotFound(BattleId),

    #[error("battle {0} already exists")]
    DuplicateBattle(BattleId),

    #[error("battle {0} is already finished")]
    Finished(BattleId),

    #[error("tick step must be finite and positive, got {0}")]
    InvalidTickStep(f64),

    #[error("battle did not finish within {ticks} ticks")]
    TickBudgetExhausted { ticks: u32 },

    #[error("battle store lock was poisoned")]
    LockPoisoned,
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Setup(err) => err.severity(),
            Self::BattleNotFound(_) | Self::DuplicateBattle(_) | Self::Finished(_) => {
                ErrorSeverity::Validation
            }
            Self::Repository(_)
            | Self::InvalidTickStep(_)
            | Self::TickBudgetExhausted { .. }
            | Self::LockPoisoned => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::BattleNotFound(_) => "RUNTIME_BATTLE_NOT_FOUND",
            Self::DuplicateBattle(_) => "RUNTIME_DUPLICATE_BATTLE",
            Self::Finished(_) => "RUNTIME_FINISHED",
            Self::InvalidTickStep(_) => "RUNTIME_INVALID_TICK_STEP",
            Self::TickBudgetExhausted { .. } => "RUNTIME_TICK_BUDGET",
            Self::LockPoisoned => "RUNTIME_LOCK_POISONED",
        }
    }
}
