//! # The Leveling Ledger
//!
//! Pure XP <-> level conversion. The invariant every other subsystem leans
//! on: `level == xp / XP_PER_LEVEL + 1`.
//!
//! No error cases, no clamping - inputs are sanitized by [`crate::caps`]
//! before they reach this module. Persistence and badge side effects belong
//! to the caller; [`XpGrant::leveled_up`] plus the old/new level pair is the
//! whole contract with the badge collaborator.

use guildhall_shared::constants::XP_PER_LEVEL;

/// Outcome of granting XP to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XpGrant {
    /// Level before the grant.
    pub old_level: u32,
    /// Accumulated XP after the grant.
    pub new_xp: u64,
    /// Level after the grant.
    pub new_level: u32,
    /// True if one or more level thresholds were crossed.
    pub leveled_up: bool,
}

/// Converts accumulated XP into a level.
///
/// Total and deterministic: `0..=99` XP is level 1, `100..=199` is level 2,
/// and so on.
#[inline]
#[must_use]
pub fn level_for_xp(xp: u64) -> u32 {
    u32::try_from(xp / XP_PER_LEVEL).map_or(u32::MAX, |thresholds| thresholds.saturating_add(1))
}

/// The minimum XP at which `level` is reached.
#[inline]
#[must_use]
pub fn xp_floor_for_level(level: u32) -> u64 {
    u64::from(level.saturating_sub(1)) * XP_PER_LEVEL
}

/// XP accumulated past the current level threshold.
///
/// Presentation helper for progress bars; always `< XP_PER_LEVEL`.
#[inline]
#[must_use]
pub fn xp_into_level(xp: u64) -> u64 {
    xp % XP_PER_LEVEL
}

/// Applies an XP amount to an actor's accumulated total.
///
/// Pure: returns the new totals and the level-up signal; the caller
/// persists and, when `leveled_up` is true, forwards the inclusive range
/// `old_level + 1 ..= new_level` to the badge collaborator.
#[must_use]
pub fn grant_xp(current_xp: u64, amount: u64) -> XpGrant {
    let old_level = level_for_xp(current_xp);
    let new_xp = current_xp.saturating_add(amount);
    let new_level = level_for_xp(new_xp);

    XpGrant {
        old_level,
        new_xp,
        new_level,
        leveled_up: new_level > old_level,
    }
}
