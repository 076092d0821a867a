//! # Balance Constants
//!
//! The economy's balance sheet. One source of truth, referenced by every
//! subsystem - formulas never embed literals.
//!
//! **CRITICAL:** The server is authoritative for every value here. Clients
//! may display these numbers; they never get to report them back.

use crate::math::Fixed;

// =============================================================================
// LEVELING
// =============================================================================

/// XP required per level. `level = xp / XP_PER_LEVEL + 1`.
pub const XP_PER_LEVEL: u64 = 100;

/// XP awarded for giving one praise.
pub const XP_PER_PRAISE: u64 = 10;

/// Maximum praises an actor may give per UTC day.
pub const MAX_PRAISES_PER_DAY: u32 = 3;

// =============================================================================
// BOSS ENCOUNTER
// =============================================================================

/// Default boss hit point pool.
pub const BOSS_MAX_HP: Fixed = Fixed::from_whole(1_000_000);

/// Default boss level.
pub const BOSS_LEVEL: u32 = 1;

/// XP granted per point of damage dealt to the boss.
pub const BOSS_XP_PER_DAMAGE: Fixed = Fixed::from_milli(100); // 0.1

/// Gold paid out when the boss falls.
pub const BOSS_GOLD_REWARD: u64 = 10_000;

/// Default boss display name.
pub const BOSS_DEFAULT_NAME: &str = "Ancient Dragon";

/// Default boss flavor text.
pub const BOSS_DEFAULT_DESCRIPTION: &str =
    "A mighty dragon that has terrorized the town for centuries. Band together to bring it down!";

/// Damage of a level-1 hit against the boss.
pub const BOSS_BASE_DAMAGE: Fixed = Fixed::ONE;

/// Additional boss damage per actor level above 1.
pub const BOSS_DAMAGE_PER_LEVEL: Fixed = Fixed::from_milli(500); // 0.5

/// Minimum interval between boss hits from one actor (ms). ~2 hits/second.
pub const MIN_HIT_INTERVAL_MS: u64 = 500;

// =============================================================================
// DUELS
// =============================================================================

/// Duel damage of a level-1 attacker.
pub const BASE_CLICK_DAMAGE: u64 = 10;

/// Additional duel damage per attacker level above 1.
pub const DAMAGE_PER_LEVEL: u64 = 5;

/// Effective hit points of a level-1 defender.
pub const BASE_HP: u64 = 50;

/// Additional defender hit points per level above 1.
pub const HP_PER_LEVEL: u64 = 5;

/// Cooldown between duel attacks from one actor (ms).
pub const DUEL_COOLDOWN_MS: u64 = 30_000;

/// XP awarded to a winning attacker.
pub const XP_PER_WIN: u64 = 50;

/// XP awarded to a losing attacker, for trying. `floor(XP_PER_WIN * 0.2)`.
pub const XP_PER_LOSS: u64 = 10;

/// Gold awarded to a winning attacker.
pub const GOLD_PER_WIN: u64 = 100;

/// Gold taken from a defeated defender.
pub const GOLD_LOSS_ON_DEFEAT: u64 = 50;

/// Damage bonus per level of advantage. 10% per level.
pub const LEVEL_DIFF_STEP: Fixed = Fixed::from_milli(100); // 0.1

/// Ceiling on the duel damage multiplier. 3x damage, never more.
///
/// There is deliberately no floor; see the resolver for the boundary.
pub const DUEL_MULTIPLIER_CAP: Fixed = Fixed::from_whole(3);

// =============================================================================
// ANTI-CHEAT INPUT CAPS
// =============================================================================
// Client-reported numbers are clamped, never trusted. Out-of-range values
// produce a bounded valid result instead of failing the request.

/// Maximum XP a single client-reported action may claim.
pub const MAX_XP_PER_ACTION: u64 = 1_000;

/// Maximum minigame level a client may claim.
pub const MAX_IMPORT_LEVEL: u32 = 1_000;

/// Minimum interval between minigame XP imports from one actor (ms).
pub const MIN_IMPORT_INTERVAL_MS: u64 = 100;

/// Minigame XP bonus per minigame level above 1. 5% per level.
pub const IMPORT_BONUS_STEP: Fixed = Fixed::from_milli(50); // 0.05

/// Ceiling on the minigame XP bonus multiplier. 50x, never more.
pub const IMPORT_BONUS_CAP: Fixed = Fixed::from_whole(50);

/// Upper bound of the valid boss damage multiplier range `[0, 10]`.
///
/// Values outside the range are ignored and the default of 1 applies.
pub const MAX_DAMAGE_MULTIPLIER: Fixed = Fixed::from_whole(10);

/// Upper bound of the valid boss XP bonus range `[0, 4]`.
///
/// Values outside the range are ignored and the default of 0 applies.
pub const MAX_XP_BONUS: Fixed = Fixed::from_whole(4);
