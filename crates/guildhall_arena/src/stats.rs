//! # Duel Stats
//!
//! One row per actor, both roles merged: wins and losses count whether the
//! actor attacked or defended. Rows are created lazily on first contact and
//! only ever updated additively.

use std::collections::HashMap;

use guildhall_shared::{ActorId, Timestamp};

/// Lifetime duel statistics for one actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DuelStats {
    /// Duels won, in either role.
    pub wins: u64,
    /// Duels lost, in either role.
    pub losses: u64,
    /// Damage dealt while attacking.
    pub total_damage_dealt: u64,
    /// Damage taken while defending.
    pub total_damage_taken: u64,
    /// The actor's most recent attack; drives the cooldown.
    pub last_attack_at: Option<Timestamp>,
}

impl DuelStats {
    /// Win percentage with one decimal, for display.
    ///
    /// Not economy math - this number is never fed back into a formula.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses;
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.wins as f64 / total as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }
}

/// One row of the PvP leaderboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaRanking {
    /// The ranked actor.
    pub actor_id: ActorId,
    /// Duels won.
    pub wins: u64,
    /// Duels lost.
    pub losses: u64,
    /// Win percentage, one decimal.
    pub win_rate: f64,
    /// Damage dealt while attacking.
    pub total_damage_dealt: u64,
}

/// Lazily-created per-actor stats rows.
#[derive(Default)]
pub struct StatsBook {
    rows: HashMap<ActorId, DuelStats>,
}

impl StatsBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The actor's stats row, if any duel ever touched them.
    #[must_use]
    pub fn stats_for(&self, actor_id: ActorId) -> Option<DuelStats> {
        self.rows.get(&actor_id).copied()
    }

    /// The attacker's most recent attack time.
    #[must_use]
    pub fn last_attack_at(&self, actor_id: ActorId) -> Option<Timestamp> {
        self.rows.get(&actor_id).and_then(|s| s.last_attack_at)
    }

    /// Applies one resolved duel to both participants' rows.
    pub fn record_duel(
        &mut self,
        attacker_id: ActorId,
        defender_id: ActorId,
        damage_dealt: u64,
        attacker_won: bool,
        now: Timestamp,
    ) {
        let attacker = self.rows.entry(attacker_id).or_default();
        if attacker_won {
            attacker.wins += 1;
        } else {
            attacker.losses += 1;
        }
        attacker.total_damage_dealt += damage_dealt;
        attacker.last_attack_at = Some(now);

        let defender = self.rows.entry(defender_id).or_default();
        if attacker_won {
            defender.losses += 1;
        } else {
            defender.wins += 1;
        }
        defender.total_damage_taken += damage_dealt;
    }

    /// The PvP leaderboard: wins descending, then damage dealt, then id.
    #[must_use]
    pub fn leaderboard(&self, limit: usize) -> Vec<ArenaRanking> {
        let mut rows: Vec<ArenaRanking> = self
            .rows
            .iter()
            .map(|(&actor_id, stats)| ArenaRanking {
                actor_id,
                wins: stats.wins,
                losses: stats.losses,
                win_rate: stats.win_rate(),
                total_damage_dealt: stats.total_damage_dealt,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(b.total_damage_dealt.cmp(&a.total_damage_dealt))
                .then(a.actor_id.cmp(&b.actor_id))
        });
        rows.truncate(limit);
        rows
    }
}
