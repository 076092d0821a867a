//! # Boss State
//!
//! A boss is one incarnation of the shared damage sink. It is born at full
//! HP, takes damage until the pool hits zero, and is then retired forever -
//! its successor is a new identity, not a respawn.
//!
//! The HP pool is an `AtomicI64` in milli-units so that concurrent attackers
//! decrement it without a lock and without lost updates.

use std::sync::atomic::{AtomicI64, Ordering};

use guildhall_shared::constants::{
    BOSS_BASE_DAMAGE, BOSS_DAMAGE_PER_LEVEL, BOSS_DEFAULT_DESCRIPTION, BOSS_DEFAULT_NAME,
    BOSS_GOLD_REWARD, BOSS_LEVEL, BOSS_MAX_HP, BOSS_XP_PER_DAMAGE,
};
use guildhall_shared::{BossId, Fixed, Timestamp};

/// Balance values a fresh boss is born with.
#[derive(Clone, Debug)]
pub struct BossSettings {
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Full hit point pool.
    pub max_hp: Fixed,
    /// Boss level (cosmetic for now).
    pub level: u32,
    /// XP granted per point of damage dealt.
    pub xp_per_damage: Fixed,
    /// Gold paid to the slayer.
    pub gold_reward: u64,
}

impl Default for BossSettings {
    fn default() -> Self {
        Self {
            name: BOSS_DEFAULT_NAME.to_owned(),
            description: BOSS_DEFAULT_DESCRIPTION.to_owned(),
            max_hp: BOSS_MAX_HP,
            level: BOSS_LEVEL,
            xp_per_damage: BOSS_XP_PER_DAMAGE,
            gold_reward: BOSS_GOLD_REWARD,
        }
    }
}

/// Read-only view of a boss, safe to hand to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BossSnapshot {
    /// This incarnation's identity.
    pub id: BossId,
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Full hit point pool.
    pub max_hp: Fixed,
    /// Remaining hit points at snapshot time.
    pub current_hp: Fixed,
    /// Boss level.
    pub level: u32,
    /// XP granted per point of damage dealt.
    pub xp_per_damage: Fixed,
    /// Gold paid to the slayer.
    pub gold_reward: u64,
    /// False once defeated.
    pub is_active: bool,
    /// When this incarnation spawned.
    pub spawn_time: Timestamp,
    /// When it fell, if it has.
    pub defeated_at: Option<Timestamp>,
}

/// One boss incarnation. Crate-internal; the outside world sees snapshots.
pub(crate) struct Boss {
    id: BossId,
    name: String,
    description: String,
    max_hp: Fixed,
    /// Remaining HP in milli-units. Clamped at zero, never negative.
    hp_milli: AtomicI64,
    level: u32,
    xp_per_damage: Fixed,
    gold_reward: u64,
    spawn_time: Timestamp,
    defeated_at: Option<Timestamp>,
    is_active: bool,
}

impl Boss {
    /// Births a fresh incarnation at full HP.
    pub(crate) fn spawn(id: BossId, settings: &BossSettings, now: Timestamp) -> Self {
        Self {
            id,
            name: settings.name.clone(),
            description: settings.description.clone(),
            max_hp: settings.max_hp,
            hp_milli: AtomicI64::new(settings.max_hp.to_milli()),
            level: settings.level,
            xp_per_damage: settings.xp_per_damage,
            gold_reward: settings.gold_reward,
            spawn_time: now,
            defeated_at: None,
            is_active: true,
        }
    }

    pub(crate) const fn id(&self) -> BossId {
        self.id
    }

    pub(crate) const fn xp_per_damage(&self) -> Fixed {
        self.xp_per_damage
    }

    pub(crate) const fn gold_reward(&self) -> u64 {
        self.gold_reward
    }

    /// Remaining HP at this instant.
    pub(crate) fn current_hp(&self) -> Fixed {
        Fixed::from_milli(self.hp_milli.load(Ordering::Acquire))
    }

    /// Atomically subtracts `damage` from the pool, clamping at zero.
    ///
    /// Returns the new HP and whether this call emptied the pool. Exactly
    /// one caller can observe `defeated == true` per incarnation. Fails if
    /// the pool was already empty - the caller acted on a stale read.
    pub(crate) fn try_apply_damage(&self, damage: Fixed) -> Option<(Fixed, bool)> {
        let dmg = damage.to_milli();
        let result = self
            .hp_milli
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |hp| {
                if hp <= 0 {
                    None
                } else {
                    Some((hp - dmg).max(0))
                }
            });

        match result {
            Ok(previous) => {
                let new_hp = (previous - dmg).max(0);
                Some((Fixed::from_milli(new_hp), new_hp == 0))
            }
            Err(_) => None,
        }
    }

    /// Retires this incarnation. Called once, by the slayer's request.
    pub(crate) fn mark_defeated(&mut self, now: Timestamp) {
        self.is_active = false;
        self.defeated_at = Some(now);
    }

    /// Copies out a read-only view.
    pub(crate) fn snapshot(&self) -> BossSnapshot {
        BossSnapshot {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            max_hp: self.max_hp,
            current_hp: self.current_hp(),
            level: self.level,
            xp_per_damage: self.xp_per_damage,
            gold_reward: self.gold_reward,
            is_active: self.is_active,
            spawn_time: self.spawn_time,
            defeated_at: self.defeated_at,
        }
    }
}

/// Damage of one hit against the boss.
///
/// `(1 + (actor_level - 1) * 0.5) * multiplier`. The multiplier must
/// already be sanitized to `[0, 10]`.
#[must_use]
pub fn hit_damage(actor_level: u32, multiplier: Fixed) -> Fixed {
    let steps = i64::from(actor_level.saturating_sub(1));
    let base = BOSS_BASE_DAMAGE.saturating_add(BOSS_DAMAGE_PER_LEVEL.mul_int(steps));
    base.mul(multiplier)
}
