//! # The Encounter
//!
//! Coordinates the active boss slot, the click gate and the damage log into
//! the one operation the outside world calls: `apply_damage`.
//!
//! ## Lifecycle
//!
//! ```text
//! NoActiveBoss --get_or_create--> Active --HP hits 0--> Defeated
//!                                   ^                      |
//!                                   +---- fresh incarnation +
//! ```
//!
//! Defeat and succession are one step: the caller that empties the pool
//! retires the incarnation and spawns its successor before returning. Any
//! cosmetic respawn delay is the presentation layer's business.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use guildhall_progression::caps;
use guildhall_shared::{ActorId, BossId, Fixed, Timestamp};

use crate::boss::{hit_damage, Boss, BossSettings, BossSnapshot};
use crate::damage_log::{DamageEvent, DamageLog, LeaderboardEntry};
use crate::error::{EncounterError, EncounterResult};
use crate::rate_limit::ClickGate;

/// Client-supplied upgrade modifiers for one hit. Untrusted.
#[derive(Clone, Copy, Debug, Default)]
pub struct DamageUpgrades {
    /// Claimed damage multiplier; valid range `[0, 10]`, default 1.
    pub damage_multiplier: Option<Fixed>,
    /// Claimed XP bonus; valid range `[0, 4]`, default 0.
    pub xp_bonus: Option<Fixed>,
}

/// Result of one accepted hit.
#[derive(Clone, Debug)]
pub struct DamageOutcome {
    /// The boss incarnation that was hit.
    pub boss_id: BossId,
    /// Damage actually applied, after sanitizing upgrades.
    pub actual_damage: Fixed,
    /// XP the hit pays out (fractional; the ledger receives the floor).
    pub xp_earned: Fixed,
    /// Pool remaining after the hit.
    pub new_hp: Fixed,
    /// True if this hit emptied the pool.
    pub defeated: bool,
    /// Gold owed to the slayer when `defeated`.
    pub gold_reward: u64,
    /// The freshly provisioned successor when `defeated`.
    pub successor: Option<BossSnapshot>,
}

/// The shared boss encounter.
pub struct Encounter {
    settings: BossSettings,
    next_id: AtomicU64,
    active: RwLock<Option<Boss>>,
    log: DamageLog,
    gate: ClickGate,
}

impl Encounter {
    /// Creates an encounter. No boss exists until the first
    /// [`Self::get_or_create_active`] or [`Self::apply_damage`].
    #[must_use]
    pub fn new(settings: BossSettings, min_hit_interval_ms: u64) -> Self {
        Self {
            settings,
            next_id: AtomicU64::new(1),
            active: RwLock::new(None),
            log: DamageLog::new(),
            gate: ClickGate::new(min_hit_interval_ms),
        }
    }

    /// Returns the active boss, creating one if none exists.
    ///
    /// Create-if-absent runs under the slot's write lock: concurrent
    /// callers cannot produce two active bosses.
    pub fn get_or_create_active(&self, now: Timestamp) -> BossSnapshot {
        if let Some(boss) = self.active.read().as_ref() {
            return boss.snapshot();
        }

        let mut slot = self.active.write();
        // Double-check: someone else may have created while we waited.
        if let Some(boss) = slot.as_ref() {
            return boss.snapshot();
        }
        let boss = self.spawn_fresh(now);
        let snapshot = boss.snapshot();
        *slot = Some(boss);
        snapshot
    }

    /// Applies one hit from `actor_id` to the active boss.
    ///
    /// Sanitizes the upgrade values, decrements the pool atomically, records
    /// the hit, and - if the pool just emptied - retires the incarnation and
    /// provisions its successor.
    ///
    /// # Errors
    ///
    /// - `RateLimited` if the actor's previous hit is too recent
    /// - `BossAlreadyDefeated` if the pool was empty (stale read); the gate
    ///   stamp is rolled back so rejection leaves no state behind
    pub fn apply_damage(
        &self,
        actor_id: ActorId,
        actor_level: u32,
        upgrades: DamageUpgrades,
        now: Timestamp,
    ) -> EncounterResult<DamageOutcome> {
        let pass = self.gate.try_pass(actor_id, now)?;

        let multiplier = caps::sanitize_damage_multiplier(upgrades.damage_multiplier);
        let xp_bonus = caps::sanitize_xp_bonus(upgrades.xp_bonus);
        let actual_damage = hit_damage(actor_level, multiplier);

        let (boss_id, xp_per_damage, gold_reward, applied) = loop {
            {
                let guard = self.active.read();
                if let Some(boss) = guard.as_ref() {
                    break (
                        boss.id(),
                        boss.xp_per_damage(),
                        boss.gold_reward(),
                        boss.try_apply_damage(actual_damage),
                    );
                }
            }
            // First hit ever: provision the boss, then retry the read path.
            let _ = self.get_or_create_active(now);
        };

        let Some((new_hp, defeated)) = applied else {
            self.gate.rollback(actor_id, pass);
            return Err(EncounterError::BossAlreadyDefeated);
        };

        let xp_earned = actual_damage
            .mul(xp_per_damage)
            .mul(Fixed::ONE.saturating_add(xp_bonus));

        self.log.record(DamageEvent {
            boss_id,
            actor_id,
            damage: actual_damage,
            xp_earned,
            dealt_at: now,
        });

        tracing::debug!(
            "{actor_id} hit {boss_id} for {actual_damage} ({xp_earned} XP), {new_hp} HP left"
        );

        let successor = if defeated {
            Some(self.retire_and_succeed(boss_id, now))
        } else {
            None
        };

        Ok(DamageOutcome {
            boss_id,
            actual_damage,
            xp_earned,
            new_hp,
            defeated,
            gold_reward: if defeated { gold_reward } else { 0 },
            successor,
        })
    }

    /// Leaderboard for one boss incarnation.
    #[must_use]
    pub fn leaderboard(&self, boss_id: BossId) -> Vec<LeaderboardEntry> {
        self.log.leaderboard(boss_id)
    }

    /// The append-only hit log.
    #[must_use]
    pub const fn damage_log(&self) -> &DamageLog {
        &self.log
    }

    /// Retires the defeated incarnation and installs its successor.
    ///
    /// Only the caller that emptied the pool gets here, so the swap cannot
    /// race; the id check guards the invariant anyway.
    fn retire_and_succeed(&self, defeated_id: BossId, now: Timestamp) -> BossSnapshot {
        let mut slot = self.active.write();

        if let Some(boss) = slot.as_mut() {
            if boss.id() == defeated_id {
                boss.mark_defeated(now);
                tracing::info!("{defeated_id} defeated, provisioning successor");
            }
        }

        let fresh = self.spawn_fresh(now);
        let snapshot = fresh.snapshot();
        *slot = Some(fresh);
        snapshot
    }

    fn spawn_fresh(&self, now: Timestamp) -> Boss {
        let id = BossId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        tracing::info!("spawning {id} with {} HP", self.settings.max_hp);
        Boss::spawn(id, &self.settings, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encounter_with_hp(hp: i64) -> Encounter {
        let settings = BossSettings {
            max_hp: Fixed::from_whole(hp),
            ..BossSettings::default()
        };
        // Interval 0 keeps the gate out of the way unless a test wants it.
        Encounter::new(settings, 0)
    }

    #[test]
    fn test_first_run_creates_the_default_boss() {
        let encounter = Encounter::new(BossSettings::default(), 500);
        let boss = encounter.get_or_create_active(Timestamp::from_millis(0));

        assert_eq!(boss.id, BossId::new(1));
        assert_eq!(boss.max_hp, Fixed::from_whole(1_000_000));
        assert_eq!(boss.current_hp, boss.max_hp);
        assert_eq!(boss.xp_per_damage, Fixed::from_milli(100));
        assert_eq!(boss.gold_reward, 10_000);
        assert!(boss.is_active);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let encounter = Encounter::new(BossSettings::default(), 500);
        let first = encounter.get_or_create_active(Timestamp::from_millis(0));
        let second = encounter.get_or_create_active(Timestamp::from_millis(1_000));
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_level_one_hit_against_fresh_boss() {
        // The canonical scenario: level 1, no upgrades, default boss.
        let encounter = Encounter::new(BossSettings::default(), 500);
        let outcome = encounter
            .apply_damage(
                ActorId::new(1),
                1,
                DamageUpgrades::default(),
                Timestamp::from_millis(1_000),
            )
            .unwrap();

        assert_eq!(outcome.actual_damage, Fixed::ONE);
        assert_eq!(outcome.xp_earned, Fixed::from_milli(100)); // 0.1
        assert_eq!(outcome.new_hp, Fixed::from_whole(999_999));
        assert!(!outcome.defeated);
        assert_eq!(outcome.gold_reward, 0);
        assert!(outcome.successor.is_none());
    }

    #[test]
    fn test_out_of_range_multiplier_is_ignored() {
        let encounter = encounter_with_hp(1_000);
        let upgrades = DamageUpgrades {
            damage_multiplier: Some(Fixed::from_whole(50)),
            xp_bonus: None,
        };
        let outcome = encounter
            .apply_damage(ActorId::new(1), 1, upgrades, Timestamp::from_millis(0))
            .unwrap();
        // Behaves exactly as multiplier 1.
        assert_eq!(outcome.actual_damage, Fixed::ONE);
    }

    #[test]
    fn test_xp_bonus_scales_payout() {
        let encounter = encounter_with_hp(1_000);
        let upgrades = DamageUpgrades {
            damage_multiplier: None,
            xp_bonus: Some(Fixed::from_whole(4)),
        };
        let outcome = encounter
            .apply_damage(ActorId::new(1), 1, upgrades, Timestamp::from_millis(0))
            .unwrap();
        // 1 damage * 0.1 * (1 + 4) = 0.5
        assert_eq!(outcome.xp_earned, Fixed::from_milli(500));
    }

    #[test]
    fn test_rate_limit_rejects_rapid_clicks() {
        let settings = BossSettings::default();
        let encounter = Encounter::new(settings, 500);
        let actor = ActorId::new(1);

        encounter
            .apply_damage(actor, 1, DamageUpgrades::default(), Timestamp::from_millis(1_000))
            .unwrap();

        let err = encounter
            .apply_damage(actor, 1, DamageUpgrades::default(), Timestamp::from_millis(1_300))
            .unwrap_err();
        assert_eq!(err, EncounterError::RateLimited { retry_after_ms: 200 });

        assert!(encounter
            .apply_damage(actor, 1, DamageUpgrades::default(), Timestamp::from_millis(1_500))
            .is_ok());
    }

    #[test]
    fn test_hp_never_goes_below_zero() {
        let encounter = encounter_with_hp(2);
        // Level 5 hits for 3; the 2 HP pool clamps at zero.
        let outcome = encounter
            .apply_damage(
                ActorId::new(1),
                5,
                DamageUpgrades::default(),
                Timestamp::from_millis(0),
            )
            .unwrap();
        assert_eq!(outcome.new_hp, Fixed::ZERO);
        assert!(outcome.defeated);
    }

    #[test]
    fn test_defeat_provisions_exactly_one_fresh_boss() {
        let encounter = encounter_with_hp(1);
        let first = encounter.get_or_create_active(Timestamp::from_millis(0));

        let outcome = encounter
            .apply_damage(
                ActorId::new(1),
                1,
                DamageUpgrades::default(),
                Timestamp::from_millis(500),
            )
            .unwrap();
        assert!(outcome.defeated);
        assert_eq!(outcome.gold_reward, BossSettings::default().gold_reward);

        let successor = outcome.successor.unwrap();
        assert_ne!(successor.id, first.id);
        assert_eq!(successor.current_hp, successor.max_hp);
        assert!(successor.is_active);

        // Subsequent reads see the successor, not another new boss.
        let active = encounter.get_or_create_active(Timestamp::from_millis(1_000));
        assert_eq!(active.id, successor.id);
    }

    #[test]
    fn test_damage_after_defeat_hits_the_successor() {
        let encounter = encounter_with_hp(1);
        let actor = ActorId::new(1);

        let defeat = encounter
            .apply_damage(actor, 1, DamageUpgrades::default(), Timestamp::from_millis(0))
            .unwrap();
        assert!(defeat.defeated);

        let next = encounter
            .apply_damage(actor, 1, DamageUpgrades::default(), Timestamp::from_millis(1_000))
            .unwrap();
        assert_eq!(next.boss_id, defeat.successor.unwrap().id);
        assert!(!next.defeated);
    }

    #[test]
    fn test_concurrent_attackers_cannot_refund_hp() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        // 4 threads * 30 hits * 1 damage against 100 HP: the pool must
        // empty exactly once, and the 20-ish surplus hits that land on the
        // successor cannot come close to emptying it again.
        let encounter = Arc::new(encounter_with_hp(100));
        encounter.get_or_create_active(Timestamp::from_millis(0));
        let defeats = Arc::new(AtomicU32::new(0));

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let encounter = Arc::clone(&encounter);
                let defeats = Arc::clone(&defeats);
                std::thread::spawn(move || {
                    for i in 0..30u64 {
                        let outcome = encounter.apply_damage(
                            ActorId::new(t + 1),
                            1,
                            DamageUpgrades::default(),
                            Timestamp::from_millis(i),
                        );
                        match outcome {
                            Ok(o) => {
                                assert!(!o.new_hp.is_negative());
                                if o.defeated {
                                    defeats.fetch_add(1, Ordering::Relaxed);
                                }
                            }
                            // A thread can land on the successor's window
                            // between emptying and swap; that is the one
                            // acceptable rejection.
                            Err(EncounterError::BossAlreadyDefeated) => {}
                            Err(other) => panic!("unexpected rejection: {other}"),
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(defeats.load(Ordering::Relaxed), 1);
        // The slot holds an active successor at full HP.
        let active = encounter.get_or_create_active(Timestamp::from_millis(99_999));
        assert!(active.is_active);
    }

    #[test]
    fn test_leaderboard_tracks_the_hit_log() {
        let encounter = encounter_with_hp(1_000);
        let boss = encounter.get_or_create_active(Timestamp::from_millis(0));

        encounter
            .apply_damage(ActorId::new(1), 5, DamageUpgrades::default(), Timestamp::from_millis(0))
            .unwrap();
        encounter
            .apply_damage(ActorId::new(2), 1, DamageUpgrades::default(), Timestamp::from_millis(1))
            .unwrap();

        let board = encounter.leaderboard(boss.id);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].actor_id, ActorId::new(1));
        assert_eq!(board[0].total_damage, Fixed::from_whole(3));
    }
}
