//! # Progression Error Types
//!
//! The ledger itself has no failure modes; errors here come from the XP
//! sources layered on top of it (quotas and rate limits). Every rejection
//! carries a retry hint and implies no state changed.

use thiserror::Error;

/// Errors that can occur while feeding XP into the ledger.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionError {
    /// The actor exhausted today's praise quota.
    #[error("daily praise limit of {limit} reached, come back tomorrow")]
    DailyLimitReached {
        /// The quota that was hit.
        limit: u32,
    },

    /// XP imports are arriving faster than the allowed rate.
    #[error("too fast, retry in {retry_after_ms} ms")]
    TooFast {
        /// Milliseconds until the next import is accepted.
        retry_after_ms: u64,
    },
}

/// Result type for progression operations.
pub type ProgressionResult<T> = Result<T, ProgressionError>;
