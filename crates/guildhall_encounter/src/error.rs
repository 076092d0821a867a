//! # Encounter Error Types
//!
//! Both variants are precondition failures: the request was well-formed but
//! arrived at the wrong moment. No state changes on rejection.

use thiserror::Error;

/// Errors that can occur while fighting the boss.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterError {
    /// The actor is clicking faster than the allowed rate.
    #[error("attacking too fast, retry in {retry_after_ms} ms")]
    RateLimited {
        /// Milliseconds until the next hit is accepted.
        retry_after_ms: u64,
    },

    /// The targeted boss already fell (the caller read stale state).
    #[error("the boss is already defeated")]
    BossAlreadyDefeated,
}

/// Result type for encounter operations.
pub type EncounterResult<T> = Result<T, EncounterError>;
