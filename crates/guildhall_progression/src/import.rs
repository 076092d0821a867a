//! # Minigame XP Import
//!
//! The clicker minigame runs entirely client-side and periodically reports
//! XP to fold into the main level. That makes every number in the request
//! untrusted: the XP amount and the claimed minigame level are clamped, and
//! imports are rate limited per actor.
//!
//! Minigame level grants a bonus on imported XP: 5% per level, capped at
//! 50x.

use std::collections::HashMap;

use guildhall_shared::constants::{IMPORT_BONUS_CAP, IMPORT_BONUS_STEP, MIN_IMPORT_INTERVAL_MS};
use guildhall_shared::{ActorId, Fixed, Timestamp};

use crate::caps;
use crate::error::{ProgressionError, ProgressionResult};

/// Receipt for an accepted XP import.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportReceipt {
    /// XP to feed through the ledger, bonus included.
    pub xp_earned: u64,
    /// The minigame level after clamping.
    pub effective_level: u32,
}

/// Accepts minigame XP reports, distrusting every field.
pub struct XpImporter {
    /// Minimum interval between imports per actor (ms).
    min_interval_ms: u64,
    /// Most recent accepted import per actor.
    last_import: HashMap<ActorId, Timestamp>,
}

impl XpImporter {
    /// Creates an importer with the given rate limit.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_import: HashMap::new(),
        }
    }

    /// The XP bonus multiplier for a clamped minigame level.
    ///
    /// `min(1 + (level - 1) * 0.05, 50)`.
    #[must_use]
    pub fn level_bonus(effective_level: u32) -> Fixed {
        let steps = i64::from(effective_level.saturating_sub(1));
        Fixed::ONE
            .saturating_add(IMPORT_BONUS_STEP.mul_int(steps))
            .min(IMPORT_BONUS_CAP)
    }

    /// Imports client-reported minigame XP.
    ///
    /// `raw_xp` and `raw_level` are clamped (never rejected) per the
    /// anti-cheat posture; only the rate limit can reject.
    ///
    /// # Errors
    ///
    /// `TooFast` if the actor imported less than the minimum interval ago;
    /// nothing is recorded in that case.
    pub fn import_xp(
        &mut self,
        actor_id: ActorId,
        raw_xp: i64,
        raw_level: i64,
        now: Timestamp,
    ) -> ProgressionResult<ImportReceipt> {
        if let Some(&last) = self.last_import.get(&actor_id) {
            let elapsed = now.millis_since(last);
            if elapsed < self.min_interval_ms {
                return Err(ProgressionError::TooFast {
                    retry_after_ms: self.min_interval_ms - elapsed,
                });
            }
        }

        let xp = caps::clamp_xp_reward(raw_xp);
        let effective_level = caps::clamp_import_level(raw_level);
        let bonus = Self::level_bonus(effective_level);

        // floor(xp * bonus); both operands are non-negative here.
        let earned = Fixed::from_whole(i64::try_from(xp).unwrap_or(i64::MAX))
            .mul(bonus)
            .floor_whole();
        let xp_earned = u64::try_from(earned).unwrap_or(0);

        self.last_import.insert(actor_id, now);

        Ok(ImportReceipt {
            xp_earned,
            effective_level,
        })
    }
}

impl Default for XpImporter {
    fn default() -> Self {
        Self::new(MIN_IMPORT_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bonus_steps() {
        assert_eq!(XpImporter::level_bonus(1), Fixed::ONE);
        // Level 11: 1 + 10 * 0.05 = 1.5
        assert_eq!(XpImporter::level_bonus(11), Fixed::from_milli(1_500));
        // Level 1000 would be 50.95x uncapped; the cap holds at 50.
        assert_eq!(XpImporter::level_bonus(1_000), Fixed::from_whole(50));
    }

    #[test]
    fn test_import_applies_bonus_and_floors() {
        let mut importer = XpImporter::new(100);
        let receipt = importer
            .import_xp(ActorId::new(1), 10, 11, Timestamp::from_millis(1_000))
            .unwrap();
        // 10 XP * 1.5 = 15
        assert_eq!(receipt.xp_earned, 15);
        assert_eq!(receipt.effective_level, 11);
    }

    #[test]
    fn test_import_clamps_suspicious_values() {
        let mut importer = XpImporter::new(100);
        let receipt = importer
            .import_xp(ActorId::new(1), 999_999, 5_000, Timestamp::from_millis(1_000))
            .unwrap();
        // XP capped at 1000, level at 1000 -> bonus capped at 50x.
        assert_eq!(receipt.xp_earned, 50_000);
        assert_eq!(receipt.effective_level, 1_000);
    }

    #[test]
    fn test_negative_xp_imports_nothing() {
        let mut importer = XpImporter::new(100);
        let receipt = importer
            .import_xp(ActorId::new(1), -500, 1, Timestamp::from_millis(1_000))
            .unwrap();
        assert_eq!(receipt.xp_earned, 0);
    }

    #[test]
    fn test_rate_limit_rejects_rapid_imports() {
        let mut importer = XpImporter::new(100);
        let actor = ActorId::new(1);

        importer
            .import_xp(actor, 10, 1, Timestamp::from_millis(1_000))
            .unwrap();

        let err = importer
            .import_xp(actor, 10, 1, Timestamp::from_millis(1_040))
            .unwrap_err();
        assert_eq!(err, ProgressionError::TooFast { retry_after_ms: 60 });

        assert!(importer
            .import_xp(actor, 10, 1, Timestamp::from_millis(1_100))
            .is_ok());
    }

    #[test]
    fn test_rate_limit_is_per_actor() {
        let mut importer = XpImporter::new(100);
        let now = Timestamp::from_millis(1_000);

        importer.import_xp(ActorId::new(1), 10, 1, now).unwrap();
        assert!(importer.import_xp(ActorId::new(2), 10, 1, now).is_ok());
    }
}
