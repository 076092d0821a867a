//! # The Arena
//!
//! Coordinates validation, the cooldown gate, the resolver, the ledger and
//! the stats book into one operation: `resolve`. The caller (the engine)
//! supplies both duelists' current state and applies the returned rewards;
//! the arena itself never touches XP or gold balances.

use guildhall_shared::constants::DUEL_COOLDOWN_MS;
use guildhall_shared::{ActorId, DuelId, Timestamp};

use crate::error::{ArenaError, ArenaResult};
use crate::records::{DuelLedger, DuelNotification, DuelRecord};
use crate::resolver::{self, DuelComputation, RewardSplit};
use crate::stats::{ArenaRanking, DuelStats, StatsBook};

/// What the arena needs to know about one duelist. Supplied by the caller
/// from the actor registry; the arena trusts it (identity is out of scope).
#[derive(Clone, Copy, Debug)]
pub struct DuelistProfile {
    /// The actor.
    pub id: ActorId,
    /// Current level.
    pub level: u32,
    /// False if the actor is deactivated.
    pub is_active: bool,
}

/// A fully resolved duel: the math, the rewards, and the ledger record.
#[derive(Clone, Copy, Debug)]
pub struct DuelOutcome {
    /// The arithmetic core of the duel.
    pub computation: DuelComputation,
    /// Who gets what.
    pub rewards: RewardSplit,
    /// The appended ledger record.
    pub record: DuelRecord,
}

/// The PvP coordinator.
pub struct Arena {
    cooldown_ms: u64,
    ledger: DuelLedger,
    stats: StatsBook,
}

impl Arena {
    /// Creates an arena with the given attack cooldown.
    #[must_use]
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            ledger: DuelLedger::new(),
            stats: StatsBook::new(),
        }
    }

    /// Creates an arena with the standard 30-second cooldown.
    #[must_use]
    pub fn with_default_cooldown() -> Self {
        Self::new(DUEL_COOLDOWN_MS)
    }

    /// Resolves one attack.
    ///
    /// On success the record is appended and both stats rows are updated;
    /// the caller applies `rewards` to the actual XP/gold balances.
    ///
    /// # Errors
    ///
    /// - `SelfAttack` if both profiles name the same actor
    /// - `DefenderInactive` if the defender is deactivated
    /// - `CooldownActive` if the attacker struck less than the cooldown ago
    ///
    /// All rejections leave the ledger and stats untouched.
    pub fn resolve(
        &mut self,
        attacker: DuelistProfile,
        defender: DuelistProfile,
        now: Timestamp,
    ) -> ArenaResult<DuelOutcome> {
        if attacker.id == defender.id {
            return Err(ArenaError::SelfAttack);
        }
        if !defender.is_active {
            return Err(ArenaError::DefenderInactive);
        }

        if let Some(last) = self.stats.last_attack_at(attacker.id) {
            let elapsed = now.millis_since(last);
            if elapsed < self.cooldown_ms {
                return Err(ArenaError::CooldownActive {
                    remaining_secs: remaining_secs_ceil(self.cooldown_ms - elapsed),
                });
            }
        }

        let computation = resolver::compute(attacker.level, defender.level);
        let rewards = resolver::rewards(computation.attacker_won);

        let mut record = DuelRecord {
            id: DuelId::new(0), // assigned by the ledger

            attacker_id: attacker.id,
            defender_id: defender.id,
            attacker_level: attacker.level,
            defender_level: defender.level,
            attacker_damage: computation.attacker_damage,
            defender_hp: computation.defender_hp,
            damage_dealt: computation.actual_damage,
            attacker_won: computation.attacker_won,
            xp_earned: rewards.xp_earned,
            gold_earned: rewards.gold_earned,
            gold_lost: rewards.gold_lost,
            created_at: now,
        };
        record.id = self.ledger.append(record);

        self.stats.record_duel(
            attacker.id,
            defender.id,
            computation.actual_damage,
            computation.attacker_won,
            now,
        );

        tracing::debug!(
            "{} vs {}: {} damage, attacker_won={}",
            attacker.id,
            defender.id,
            computation.actual_damage,
            computation.attacker_won
        );

        Ok(DuelOutcome {
            computation,
            rewards,
            record,
        })
    }

    /// The actor's stats row, if any.
    #[must_use]
    pub fn stats_for(&self, actor_id: ActorId) -> Option<DuelStats> {
        self.stats.stats_for(actor_id)
    }

    /// The PvP leaderboard, at most `limit` rows.
    #[must_use]
    pub fn leaderboard(&self, limit: usize) -> Vec<ArenaRanking> {
        self.stats.leaderboard(limit)
    }

    /// The defender's notification feed.
    #[must_use]
    pub fn notifications_for(
        &self,
        defender_id: ActorId,
        after: Option<DuelId>,
    ) -> Vec<DuelNotification> {
        self.ledger.notifications_for(defender_id, after)
    }

    /// Number of resolved duels.
    #[must_use]
    pub fn duel_count(&self) -> usize {
        self.ledger.len()
    }
}

/// Milliseconds to whole seconds, rounded up.
const fn remaining_secs_ceil(remaining_ms: u64) -> u64 {
    remaining_ms.div_ceil(1_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duelist(id: u64, level: u32) -> DuelistProfile {
        DuelistProfile {
            id: ActorId::new(id),
            level,
            is_active: true,
        }
    }

    #[test]
    fn test_resolved_duel_updates_ledger_and_stats() {
        let mut arena = Arena::new(30_000);
        let outcome = arena
            .resolve(duelist(1, 5), duelist(2, 1), Timestamp::from_millis(0))
            .unwrap();

        assert!(outcome.computation.attacker_won);
        assert_eq!(outcome.rewards.xp_earned, 50);
        assert_eq!(arena.duel_count(), 1);
        assert_eq!(arena.stats_for(ActorId::new(1)).unwrap().wins, 1);
        assert_eq!(arena.stats_for(ActorId::new(2)).unwrap().losses, 1);
    }

    #[test]
    fn test_self_attack_is_rejected_without_a_record() {
        let mut arena = Arena::new(30_000);
        let err = arena
            .resolve(duelist(1, 5), duelist(1, 5), Timestamp::from_millis(0))
            .unwrap_err();
        assert_eq!(err, ArenaError::SelfAttack);
        assert_eq!(arena.duel_count(), 0);
        assert!(arena.stats_for(ActorId::new(1)).is_none());
    }

    #[test]
    fn test_inactive_defender_is_rejected() {
        let mut arena = Arena::new(30_000);
        let defender = DuelistProfile {
            is_active: false,
            ..duelist(2, 1)
        };
        let err = arena
            .resolve(duelist(1, 5), defender, Timestamp::from_millis(0))
            .unwrap_err();
        assert_eq!(err, ArenaError::DefenderInactive);
        assert_eq!(arena.duel_count(), 0);
    }

    #[test]
    fn test_cooldown_gates_the_second_attack() {
        let mut arena = Arena::new(30_000);
        arena
            .resolve(duelist(1, 5), duelist(2, 1), Timestamp::from_millis(10_000))
            .unwrap();

        // 12.5s elapsed; 17.5s remain, reported as ceil = 18.
        let err = arena
            .resolve(duelist(1, 5), duelist(3, 1), Timestamp::from_millis(22_500))
            .unwrap_err();
        assert_eq!(err, ArenaError::CooldownActive { remaining_secs: 18 });
        assert_eq!(arena.duel_count(), 1);

        // Exactly at the boundary the attack goes through.
        assert!(arena
            .resolve(duelist(1, 5), duelist(3, 1), Timestamp::from_millis(40_000))
            .is_ok());
    }

    #[test]
    fn test_cooldown_does_not_gate_the_defender() {
        let mut arena = Arena::new(30_000);
        arena
            .resolve(duelist(1, 5), duelist(2, 5), Timestamp::from_millis(0))
            .unwrap();

        // Actor 2 was attacked moments ago; their own attack is unaffected.
        assert!(arena
            .resolve(duelist(2, 5), duelist(1, 5), Timestamp::from_millis(1_000))
            .is_ok());
    }

    #[test]
    fn test_losing_attack_still_records_and_rewards_consolation() {
        let mut arena = Arena::new(30_000);
        let outcome = arena
            .resolve(duelist(1, 1), duelist(2, 1), Timestamp::from_millis(0))
            .unwrap();

        assert!(!outcome.computation.attacker_won);
        assert_eq!(outcome.rewards.xp_earned, 10);
        assert_eq!(outcome.rewards.gold_earned, 0);
        assert_eq!(outcome.record.gold_lost, 0);
        assert_eq!(arena.stats_for(ActorId::new(2)).unwrap().wins, 1);
    }

    #[test]
    fn test_notifications_flow_from_resolved_duels() {
        let mut arena = Arena::new(0);
        arena
            .resolve(duelist(1, 5), duelist(2, 1), Timestamp::from_millis(0))
            .unwrap();
        arena
            .resolve(duelist(3, 1), duelist(2, 9), Timestamp::from_millis(1_000))
            .unwrap();

        let feed = arena.notifications_for(ActorId::new(2), None);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].attacker_id, ActorId::new(3));
        assert!(feed[0].defender_won);
    }
}
