//! # Duel Resolver
//!
//! The pure arithmetic at the heart of PvP. Everything derives from two
//! level numbers; given the same pair, the outcome is always the same.
//!
//! ## The multiplier boundary
//!
//! `min(1 + level_diff * 0.1, 3)` caps the upside at 3x but has NO lower
//! clamp: an attacker 10+ levels below the defender drives the multiplier
//! to zero or negative. The final `max(1, floor(...))` is the only floor -
//! a hopeless attacker still lands exactly 1 damage. This boundary is
//! deliberate and pinned by tests; do not "fix" it with a lower clamp.

use guildhall_shared::constants::{
    BASE_CLICK_DAMAGE, BASE_HP, DAMAGE_PER_LEVEL, DUEL_MULTIPLIER_CAP, GOLD_LOSS_ON_DEFEAT,
    GOLD_PER_WIN, HP_PER_LEVEL, LEVEL_DIFF_STEP, XP_PER_LOSS, XP_PER_WIN,
};
use guildhall_shared::Fixed;

/// The deterministic core of one duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuelComputation {
    /// Attacker's raw blow: `10 + (level - 1) * 5`.
    pub attacker_damage: u64,
    /// Defender's effective HP bar: `50 + (level - 1) * 5`.
    pub defender_hp: u64,
    /// Level-difference multiplier, capped above at 3.
    pub multiplier: Fixed,
    /// The blow after the multiplier, floored, minimum 1.
    pub actual_damage: u64,
    /// True if the blow met or exceeded the HP bar.
    pub attacker_won: bool,
}

/// Who gets what after a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSplit {
    /// XP to the attacker.
    pub xp_earned: u64,
    /// Gold to the attacker.
    pub gold_earned: u64,
    /// Gold taken from the defender.
    pub gold_lost: u64,
}

/// The attacker's raw blow for a level.
#[inline]
#[must_use]
pub fn attacker_damage(level: u32) -> u64 {
    BASE_CLICK_DAMAGE + u64::from(level.saturating_sub(1)) * DAMAGE_PER_LEVEL
}

/// The defender's effective HP bar for a level.
#[inline]
#[must_use]
pub fn defender_hp(level: u32) -> u64 {
    BASE_HP + u64::from(level.saturating_sub(1)) * HP_PER_LEVEL
}

/// The level-difference multiplier: `min(1 + diff * 0.1, 3)`, no lower clamp.
#[must_use]
pub fn damage_multiplier(attacker_level: u32, defender_level: u32) -> Fixed {
    let diff = i64::from(attacker_level) - i64::from(defender_level);
    Fixed::ONE
        .saturating_add(LEVEL_DIFF_STEP.mul_int(diff))
        .min(DUEL_MULTIPLIER_CAP)
}

/// Resolves one duel from the two current levels.
#[must_use]
pub fn compute(attacker_level: u32, defender_level: u32) -> DuelComputation {
    let raw_damage = attacker_damage(attacker_level);
    let hp = defender_hp(defender_level);
    let multiplier = damage_multiplier(attacker_level, defender_level);

    // floor(damage * multiplier), then the hard floor of 1.
    let scaled = Fixed::from_whole(i64::try_from(raw_damage).unwrap_or(i64::MAX))
        .mul(multiplier)
        .floor_whole();
    let actual_damage = u64::try_from(scaled.max(1)).unwrap_or(1);

    DuelComputation {
        attacker_damage: raw_damage,
        defender_hp: hp,
        multiplier,
        actual_damage,
        attacker_won: actual_damage >= hp,
    }
}

/// The reward split for an outcome.
///
/// Win: attacker takes XP and gold, the defender bleeds gold. Loss: the
/// attacker gets consolation XP for trying; no gold moves either way.
#[must_use]
pub const fn rewards(attacker_won: bool) -> RewardSplit {
    if attacker_won {
        RewardSplit {
            xp_earned: XP_PER_WIN,
            gold_earned: GOLD_PER_WIN,
            gold_lost: GOLD_LOSS_ON_DEFEAT,
        }
    } else {
        RewardSplit {
            xp_earned: XP_PER_LOSS,
            gold_earned: 0,
            gold_lost: 0,
        }
    }
}
