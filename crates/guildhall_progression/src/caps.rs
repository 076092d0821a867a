//! # Untrusted-Input Caps
//!
//! ## Philosophy
//!
//! NEVER trust the client. The client says "I earned 50,000 XP" or "apply
//! my 50x damage upgrade". We clamp every such number to the documented
//! range and keep serving the request - a bounded valid result beats a
//! failed request, and a cheater learns nothing from a clamp.
//!
//! Suspicious values are logged so an operator can follow up.

use guildhall_shared::constants::{
    MAX_DAMAGE_MULTIPLIER, MAX_IMPORT_LEVEL, MAX_XP_BONUS, MAX_XP_PER_ACTION,
};
use guildhall_shared::Fixed;

/// Clamps a client-reported XP amount to `[0, MAX_XP_PER_ACTION]`.
#[must_use]
pub fn clamp_xp_reward(raw: i64) -> u64 {
    let max = i64::try_from(MAX_XP_PER_ACTION).unwrap_or(i64::MAX);
    if raw < 0 || raw > max {
        tracing::warn!("suspicious XP value {raw}, capping to [0, {max}]");
    }
    u64::try_from(raw.clamp(0, max)).unwrap_or(0)
}

/// Clamps a client-reported minigame level to `[1, MAX_IMPORT_LEVEL]`.
#[must_use]
pub fn clamp_import_level(raw: i64) -> u32 {
    let max = i64::from(MAX_IMPORT_LEVEL);
    if raw < 1 || raw > max {
        tracing::warn!("suspicious minigame level {raw}, capping to [1, {max}]");
    }
    u32::try_from(raw.clamp(1, max)).unwrap_or(1)
}

/// Validates a client-supplied boss damage multiplier.
///
/// Valid range is `[0, 10]`. An absent or out-of-range value falls back to
/// the default of 1 - out-of-range input is ignored, not clamped to the
/// nearest bound, so a claimed 50x multiplier buys exactly 1x.
#[must_use]
pub fn sanitize_damage_multiplier(raw: Option<Fixed>) -> Fixed {
    match raw {
        Some(value) if !value.is_negative() && value <= MAX_DAMAGE_MULTIPLIER => value,
        Some(value) => {
            tracing::warn!("invalid damage multiplier {value}, using default 1");
            Fixed::ONE
        }
        None => Fixed::ONE,
    }
}

/// Validates a client-supplied boss XP bonus.
///
/// Valid range is `[0, 4]`. An absent or out-of-range value falls back to
/// the default of 0.
#[must_use]
pub fn sanitize_xp_bonus(raw: Option<Fixed>) -> Fixed {
    match raw {
        Some(value) if !value.is_negative() && value <= MAX_XP_BONUS => value,
        Some(value) => {
            tracing::warn!("invalid XP bonus {value}, using default 0");
            Fixed::ZERO
        }
        None => Fixed::ZERO,
    }
}
