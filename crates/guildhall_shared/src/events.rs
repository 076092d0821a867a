//! Events broadcast by the economy to its collaborators.
//!
//! The badge/achievement system subscribes to these; it owns unlock
//! semantics, we only signal transitions. The presentation layer may also
//! listen for visual feedback. Events are facts - they are emitted after
//! state has changed, never before.

use serde::{Deserialize, Serialize};

use crate::ids::{ActorId, BossId, DuelId};
use crate::math::Fixed;

/// Event type discriminator
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// An actor crossed a level threshold
    LevelUp = 0,
    /// A fresh boss became active
    BossSpawned = 1,
    /// The boss hit point pool reached zero
    BossDefeated = 2,
    /// A duel was resolved
    DuelResolved = 3,
}

/// State transitions the economy announces to the outside world.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GameEvent {
    /// An actor gained enough XP to cross one or more level thresholds.
    ///
    /// The badge collaborator scans the inclusive range
    /// `old_level + 1 ..= new_level` for unlocks.
    LevelUp {
        /// Actor that leveled.
        actor_id: ActorId,
        /// Level before the grant.
        old_level: u32,
        /// Level after the grant.
        new_level: u32,
        /// Total XP after the grant.
        total_xp: u64,
    },

    /// A fresh boss incarnation became the active damage sink.
    BossSpawned {
        /// The new boss.
        boss_id: BossId,
        /// Its full hit point pool.
        max_hp: Fixed,
    },

    /// The active boss fell.
    BossDefeated {
        /// The defeated boss.
        boss_id: BossId,
        /// Actor that landed the final blow.
        slayer: ActorId,
        /// Gold paid to the slayer.
        gold_reward: u64,
    },

    /// A duel between two actors was resolved.
    DuelResolved {
        /// Ledger id of the duel record.
        duel_id: DuelId,
        /// The attacker.
        attacker_id: ActorId,
        /// The defender.
        defender_id: ActorId,
        /// Did the attacker win?
        attacker_won: bool,
        /// Damage dealt by the attacker.
        damage_dealt: u64,
    },
}

impl GameEvent {
    /// Returns the event type
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::LevelUp { .. } => EventType::LevelUp,
            Self::BossSpawned { .. } => EventType::BossSpawned,
            Self::BossDefeated { .. } => EventType::BossDefeated,
            Self::DuelResolved { .. } => EventType::DuelResolved,
        }
    }
}
