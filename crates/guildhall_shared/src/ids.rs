//! Opaque identifiers for the economy's aggregate roots.
//!
//! All identifiers are server-assigned, monotonically increasing integers.
//! Nothing about an id is meaningful to a client beyond equality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one actor (player) in the economy.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct ActorId(u64);

impl ActorId {
    /// Wraps a raw identifier.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Identifies one boss incarnation.
///
/// A defeated boss is never reused; its successor gets a fresh id.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct BossId(u64);

impl BossId {
    /// Wraps a raw identifier.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BossId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "boss#{}", self.0)
    }
}

/// Identifies one resolved duel in the append-only duel ledger.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct DuelId(u64);

impl DuelId {
    /// Wraps a raw identifier.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duel#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_ordered() {
        assert!(ActorId::new(1) < ActorId::new(2));
        assert!(BossId::new(7) > BossId::new(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(ActorId::new(42).to_string(), "actor#42");
        assert_eq!(BossId::new(1).to_string(), "boss#1");
        assert_eq!(DuelId::new(9).to_string(), "duel#9");
    }
}
