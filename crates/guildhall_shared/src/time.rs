//! Wall-clock timestamps.
//!
//! Every rate limit and cooldown in the economy is a delta between two
//! [`Timestamp`]s. Operations take `now` as an explicit argument so that a
//! whole session can be replayed deterministically; only the outermost
//! caller ever consults the system clock.

use serde::{Deserialize, Serialize};

/// Milliseconds in one UTC day.
const DAY_MS: u64 = 86_400_000;

/// A point in time, in milliseconds since the Unix epoch.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates from raw epoch milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns epoch milliseconds.
    #[inline]
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Reads the system clock.
    ///
    /// A clock before the epoch reads as the epoch itself.
    #[must_use]
    pub fn now() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self(millis)
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    #[inline]
    #[must_use]
    pub const fn millis_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns this timestamp shifted forward.
    #[inline]
    #[must_use]
    pub const fn add_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// The UTC day this timestamp falls on, as days since the epoch.
    ///
    /// Used for daily quotas (praise).
    #[inline]
    #[must_use]
    pub const fn day_index(self) -> u64 {
        self.0 / DAY_MS
    }
}
