//! # Duel Ledger
//!
//! Append-only log of every resolved duel, and the defender-side
//! notification feed derived from it. Records are never mutated or deleted;
//! a notification is just a read at an offset.

use guildhall_shared::{ActorId, DuelId, Timestamp};

/// Most notifications returned per poll.
const NOTIFICATION_LIMIT: usize = 10;

/// One resolved duel. Append-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuelRecord {
    /// Ledger id, monotonically increasing.
    pub id: DuelId,
    /// The attacker.
    pub attacker_id: ActorId,
    /// The defender.
    pub defender_id: ActorId,
    /// Attacker level at resolution time.
    pub attacker_level: u32,
    /// Defender level at resolution time.
    pub defender_level: u32,
    /// Attacker's raw blow before the multiplier.
    pub attacker_damage: u64,
    /// Defender's effective HP bar.
    pub defender_hp: u64,
    /// Damage actually dealt.
    pub damage_dealt: u64,
    /// Did the attacker win?
    pub attacker_won: bool,
    /// XP the attacker earned.
    pub xp_earned: u64,
    /// Gold the attacker earned.
    pub gold_earned: u64,
    /// Gold the defender lost.
    pub gold_lost: u64,
    /// When the duel resolved.
    pub created_at: Timestamp,
}

/// A defender-side notification: "you were attacked".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuelNotification {
    /// The duel this notification reports.
    pub duel_id: DuelId,
    /// Who attacked.
    pub attacker_id: ActorId,
    /// The attacker's level at the time.
    pub attacker_level: u32,
    /// True if the defender held - the attacker's loss is their win.
    pub defender_won: bool,
    /// Damage the attacker dealt.
    pub damage_dealt: u64,
    /// When it happened.
    pub created_at: Timestamp,
}

/// The append-only duel log.
#[derive(Default)]
pub struct DuelLedger {
    records: Vec<DuelRecord>,
    next_id: u64,
}

impl DuelLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, assigning its ledger id.
    pub fn append(&mut self, mut record: DuelRecord) -> DuelId {
        self.next_id += 1;
        let id = DuelId::new(self.next_id);
        record.id = id;
        self.records.push(record);
        id
    }

    /// Number of resolved duels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no duel was resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up one record.
    #[must_use]
    pub fn get(&self, id: DuelId) -> Option<&DuelRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Recent duels where `defender_id` was attacked, most recent first.
    ///
    /// With `after`, only duels newer than that record are returned - the
    /// poll cursor the presentation layer remembers between refreshes. At
    /// most ten rows per call.
    #[must_use]
    pub fn notifications_for(
        &self,
        defender_id: ActorId,
        after: Option<DuelId>,
    ) -> Vec<DuelNotification> {
        self.records
            .iter()
            .rev()
            .filter(|r| r.defender_id == defender_id)
            .filter(|r| after.map_or(true, |marker| r.id > marker))
            .take(NOTIFICATION_LIMIT)
            .map(|r| DuelNotification {
                duel_id: r.id,
                attacker_id: r.attacker_id,
                attacker_level: r.attacker_level,
                defender_won: !r.attacker_won,
                damage_dealt: r.damage_dealt,
                created_at: r.created_at,
            })
            .collect()
    }
}
