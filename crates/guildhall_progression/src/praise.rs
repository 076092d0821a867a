//! # Praise
//!
//! Actors hand out praise to each other; each praise is worth a small fixed
//! XP reward, with a daily quota so the well runs dry. The praise log is
//! append-only and doubles as the data source for the toplist.

use guildhall_shared::{ActorId, Timestamp};

use crate::error::{ProgressionError, ProgressionResult};

/// One given praise. Append-only.
#[derive(Clone, Copy, Debug)]
pub struct PraiseEvent {
    /// The actor who praised.
    pub actor_id: ActorId,
    /// XP the praise was worth at the time.
    pub xp_earned: u64,
    /// When the praise was given.
    pub praised_at: Timestamp,
}

/// Receipt returned for an accepted praise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PraiseReceipt {
    /// XP to feed through the ledger.
    pub xp_earned: u64,
    /// Praises the actor may still give today.
    pub praises_remaining: u32,
}

/// An actor's standing against today's quota.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PraiseStatus {
    /// Praises given today.
    pub praises_today: u32,
    /// Praises left today.
    pub praises_remaining: u32,
}

/// One row of the praiser toplist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PraiserRanking {
    /// The praising actor.
    pub actor_id: ActorId,
    /// Praises given in the window.
    pub praises: u64,
    /// XP earned from praising in the window.
    pub total_xp: u64,
}

/// The praise log and its quota bookkeeping.
pub struct PraiseBook {
    /// XP per accepted praise.
    xp_per_praise: u64,
    /// Daily quota per actor.
    max_per_day: u32,
    /// Append-only log.
    events: Vec<PraiseEvent>,
}

impl PraiseBook {
    /// Creates a praise book with the given balance values.
    #[must_use]
    pub const fn new(xp_per_praise: u64, max_per_day: u32) -> Self {
        Self {
            xp_per_praise,
            max_per_day,
            events: Vec::new(),
        }
    }

    /// Counts praises the actor gave on the UTC day of `now`.
    fn praises_on_day(&self, actor_id: ActorId, now: Timestamp) -> u32 {
        let day = now.day_index();
        let count = self
            .events
            .iter()
            .filter(|e| e.actor_id == actor_id && e.praised_at.day_index() == day)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Records one praise from `actor_id`.
    ///
    /// # Errors
    ///
    /// `DailyLimitReached` once the actor has exhausted today's quota;
    /// nothing is recorded in that case.
    pub fn give_praise(
        &mut self,
        actor_id: ActorId,
        now: Timestamp,
    ) -> ProgressionResult<PraiseReceipt> {
        let today = self.praises_on_day(actor_id, now);
        if today >= self.max_per_day {
            return Err(ProgressionError::DailyLimitReached {
                limit: self.max_per_day,
            });
        }

        self.events.push(PraiseEvent {
            actor_id,
            xp_earned: self.xp_per_praise,
            praised_at: now,
        });

        Ok(PraiseReceipt {
            xp_earned: self.xp_per_praise,
            praises_remaining: self.max_per_day - today - 1,
        })
    }

    /// Returns the actor's standing against today's quota.
    #[must_use]
    pub fn status(&self, actor_id: ActorId, now: Timestamp) -> PraiseStatus {
        let today = self.praises_on_day(actor_id, now);
        PraiseStatus {
            praises_today: today,
            praises_remaining: self.max_per_day.saturating_sub(today),
        }
    }

    /// Aggregates the toplist of praisers since `since` (inclusive).
    ///
    /// Sorted by XP descending, then praise count, then actor id. The
    /// caller picks the window (the dashboard uses start-of-month).
    #[must_use]
    pub fn top_praisers_since(&self, since: Timestamp) -> Vec<PraiserRanking> {
        let mut totals: Vec<PraiserRanking> = Vec::new();

        for event in self.events.iter().filter(|e| e.praised_at >= since) {
            match totals.iter_mut().find(|r| r.actor_id == event.actor_id) {
                Some(row) => {
                    row.praises += 1;
                    row.total_xp += event.xp_earned;
                }
                None => totals.push(PraiserRanking {
                    actor_id: event.actor_id,
                    praises: 1,
                    total_xp: event.xp_earned,
                }),
            }
        }

        totals.sort_by(|a, b| {
            b.total_xp
                .cmp(&a.total_xp)
                .then(b.praises.cmp(&a.praises))
                .then(a.actor_id.cmp(&b.actor_id))
        });
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: u64 = 86_400_000;

    fn book() -> PraiseBook {
        PraiseBook::new(10, 3)
    }

    #[test]
    fn test_praise_grants_xp_and_counts_down() {
        let mut book = book();
        let actor = ActorId::new(1);
        let now = Timestamp::from_millis(DAY_MS * 10);

        let first = book.give_praise(actor, now).unwrap();
        assert_eq!(first.xp_earned, 10);
        assert_eq!(first.praises_remaining, 2);

        book.give_praise(actor, now.add_millis(60_000)).unwrap();
        let third = book.give_praise(actor, now.add_millis(120_000)).unwrap();
        assert_eq!(third.praises_remaining, 0);
    }

    #[test]
    fn test_daily_limit_rejects_fourth_praise() {
        let mut book = book();
        let actor = ActorId::new(1);
        let now = Timestamp::from_millis(DAY_MS * 10);

        for i in 0..3 {
            book.give_praise(actor, now.add_millis(i)).unwrap();
        }

        let err = book.give_praise(actor, now.add_millis(5_000)).unwrap_err();
        assert_eq!(err, ProgressionError::DailyLimitReached { limit: 3 });
    }

    #[test]
    fn test_quota_resets_at_midnight() {
        let mut book = book();
        let actor = ActorId::new(1);
        let today = Timestamp::from_millis(DAY_MS * 10 + 1_000);

        for i in 0..3 {
            book.give_praise(actor, today.add_millis(i)).unwrap();
        }

        let tomorrow = Timestamp::from_millis(DAY_MS * 11);
        assert!(book.give_praise(actor, tomorrow).is_ok());
        assert_eq!(book.status(actor, tomorrow).praises_today, 1);
    }

    #[test]
    fn test_quotas_are_per_actor() {
        let mut book = book();
        let now = Timestamp::from_millis(DAY_MS * 10);

        for i in 0..3 {
            book.give_praise(ActorId::new(1), now.add_millis(i)).unwrap();
        }

        assert!(book.give_praise(ActorId::new(2), now).is_ok());
    }

    #[test]
    fn test_toplist_orders_by_xp() {
        let mut book = book();
        let now = Timestamp::from_millis(DAY_MS * 10);

        book.give_praise(ActorId::new(1), now).unwrap();
        book.give_praise(ActorId::new(2), now).unwrap();
        book.give_praise(ActorId::new(2), now.add_millis(1)).unwrap();

        let top = book.top_praisers_since(Timestamp::from_millis(DAY_MS * 10));
        assert_eq!(top[0].actor_id, ActorId::new(2));
        assert_eq!(top[0].total_xp, 20);
        assert_eq!(top[1].actor_id, ActorId::new(1));
    }

    #[test]
    fn test_toplist_window_excludes_older_events() {
        let mut book = book();
        let old = Timestamp::from_millis(DAY_MS * 5);
        let recent = Timestamp::from_millis(DAY_MS * 10);

        book.give_praise(ActorId::new(1), old).unwrap();
        book.give_praise(ActorId::new(1), recent).unwrap();

        let top = book.top_praisers_since(Timestamp::from_millis(DAY_MS * 8));
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].praises, 1);
    }
}
