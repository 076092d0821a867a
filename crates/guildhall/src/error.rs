//! # Engine Error Types
//!
//! The engine folds every subsystem error into one enum so the dashboard
//! handles a single type. Nothing here is fatal to the process; every
//! failure is scoped to one request.

use thiserror::Error;

use guildhall_shared::ActorId;

use crate::config::ConfigError;

/// Errors surfaced by the engine facade.
#[derive(Error, Debug)]
pub enum GuildhallError {
    /// The acting actor does not exist.
    #[error("unknown {0}")]
    ActorNotFound(ActorId),

    /// The acting actor is deactivated.
    #[error("{0} is deactivated")]
    ActorInactive(ActorId),

    /// The duel target does not exist.
    #[error("defender {0} not found")]
    DefenderNotFound(ActorId),

    /// Boss encounter rejection.
    #[error(transparent)]
    Encounter(#[from] guildhall_encounter::EncounterError),

    /// Duel rejection.
    #[error(transparent)]
    Arena(#[from] guildhall_arena::ArenaError),

    /// XP source rejection (quota or rate limit).
    #[error(transparent)]
    Progression(#[from] guildhall_progression::ProgressionError),

    /// Balance configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for engine operations.
pub type GuildhallResult<T> = Result<T, GuildhallError>;
