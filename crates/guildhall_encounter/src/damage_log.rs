//! # Damage Log
//!
//! Append-only record of every hit against every boss incarnation. Never
//! mutated, never pruned. Serves exactly two queries: the per-boss
//! leaderboard and (indirectly) damage history for the presentation layer.

use parking_lot::RwLock;

use guildhall_shared::{ActorId, BossId, Fixed, Timestamp};

/// One recorded hit. Append-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    /// The boss incarnation that was hit.
    pub boss_id: BossId,
    /// The attacking actor.
    pub actor_id: ActorId,
    /// Damage dealt by this hit.
    pub damage: Fixed,
    /// XP the hit paid out.
    pub xp_earned: Fixed,
    /// When the hit landed.
    pub dealt_at: Timestamp,
}

/// One row of the boss leaderboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// The contributing actor.
    pub actor_id: ActorId,
    /// Sum of the actor's damage against this boss.
    pub total_damage: Fixed,
    /// Sum of the XP the actor earned from this boss.
    pub total_xp: Fixed,
    /// The actor's first hit against this boss; the tie-breaker.
    pub first_hit_at: Timestamp,
}

/// The append-only hit log.
#[derive(Default)]
pub struct DamageLog {
    events: RwLock<Vec<DamageEvent>>,
}

impl DamageLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one hit.
    pub fn record(&self, event: DamageEvent) {
        self.events.write().push(event);
    }

    /// Number of recorded hits across all bosses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Aggregates the leaderboard for one boss incarnation.
    ///
    /// Descending by total damage. Equal totals rank by earliest first
    /// contribution, then actor id - deterministic and stable across calls.
    #[must_use]
    pub fn leaderboard(&self, boss_id: BossId) -> Vec<LeaderboardEntry> {
        let events = self.events.read();
        let mut rows: Vec<LeaderboardEntry> = Vec::new();

        for event in events.iter().filter(|e| e.boss_id == boss_id) {
            match rows.iter_mut().find(|r| r.actor_id == event.actor_id) {
                Some(row) => {
                    row.total_damage += event.damage;
                    row.total_xp += event.xp_earned;
                    row.first_hit_at = row.first_hit_at.min(event.dealt_at);
                }
                None => rows.push(LeaderboardEntry {
                    actor_id: event.actor_id,
                    total_damage: event.damage,
                    total_xp: event.xp_earned,
                    first_hit_at: event.dealt_at,
                }),
            }
        }

        rows.sort_by(|a, b| {
            b.total_damage
                .cmp(&a.total_damage)
                .then(a.first_hit_at.cmp(&b.first_hit_at))
                .then(a.actor_id.cmp(&b.actor_id))
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(boss: u64, actor: u64, damage: i64, at: u64) -> DamageEvent {
        DamageEvent {
            boss_id: BossId::new(boss),
            actor_id: ActorId::new(actor),
            damage: Fixed::from_whole(damage),
            xp_earned: Fixed::from_milli(damage * 100),
            dealt_at: Timestamp::from_millis(at),
        }
    }

    #[test]
    fn test_leaderboard_sums_and_sorts() {
        let log = DamageLog::new();
        log.record(hit(1, 10, 5, 100));
        log.record(hit(1, 11, 9, 200));
        log.record(hit(1, 10, 3, 300));

        let board = log.leaderboard(BossId::new(1));
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].actor_id, ActorId::new(11));
        assert_eq!(board[0].total_damage, Fixed::from_whole(9));
        assert_eq!(board[1].actor_id, ActorId::new(10));
        assert_eq!(board[1].total_damage, Fixed::from_whole(8));
        assert_eq!(board[1].total_xp, Fixed::from_milli(800));
    }

    #[test]
    fn test_leaderboard_scopes_to_one_boss() {
        let log = DamageLog::new();
        log.record(hit(1, 10, 5, 100));
        log.record(hit(2, 10, 50, 200));

        let board = log.leaderboard(BossId::new(1));
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].total_damage, Fixed::from_whole(5));
    }

    #[test]
    fn test_ties_break_by_first_contribution() {
        let log = DamageLog::new();
        // Same totals; actor 20 showed up first.
        log.record(hit(1, 21, 4, 500));
        log.record(hit(1, 20, 1, 100));
        log.record(hit(1, 20, 3, 600));

        let board = log.leaderboard(BossId::new(1));
        assert_eq!(board[0].actor_id, ActorId::new(20));
        assert_eq!(board[1].actor_id, ActorId::new(21));
    }

    #[test]
    fn test_empty_log() {
        let log = DamageLog::new();
        assert!(log.is_empty());
        assert!(log.leaderboard(BossId::new(1)).is_empty());
        log.record(hit(1, 1, 1, 1));
        assert_eq!(log.len(), 1);
    }
}
