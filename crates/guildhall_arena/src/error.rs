//! # Arena Error Types
//!
//! Validation and precondition failures for duels. Every rejection is
//! scoped to one request and implies no state changed.

use thiserror::Error;

/// Errors that can occur while resolving a duel.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// An actor tried to attack themselves.
    #[error("you cannot attack yourself")]
    SelfAttack,

    /// The targeted defender is deactivated.
    #[error("defender is inactive")]
    DefenderInactive,

    /// The attacker's cooldown has not elapsed.
    #[error("wait {remaining_secs} seconds before attacking again")]
    CooldownActive {
        /// Whole seconds until the next attack is allowed, rounded up.
        remaining_secs: u64,
    },
}

/// Result type for arena operations.
pub type ArenaResult<T> = Result<T, ArenaError>;
