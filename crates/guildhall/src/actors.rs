//! # Actor Registry
//!
//! The in-memory store of every actor's level, XP and gold. XP application
//! is read-modify-write **under the registry's write lock**, so concurrent
//! grants cannot lose updates.
//!
//! Actors are never deleted, only deactivated. The one sanctioned way XP
//! goes down is the admin progress reset.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use guildhall_progression::ledger::{self, XpGrant};
use guildhall_shared::ActorId;

/// One actor's persistent state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    /// The actor's identity.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Current level, derived from `xp`.
    pub level: u32,
    /// Accumulated experience points.
    pub xp: u64,
    /// Gold balance. Never below zero.
    pub gold: u64,
    /// False once deactivated.
    pub is_active: bool,
}

/// Thread-safe actor store.
pub struct ActorRegistry {
    next_id: AtomicU64,
    actors: RwLock<HashMap<ActorId, Actor>>,
}

impl ActorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            actors: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new actor at level 1 with nothing to their name.
    pub fn register(&self, name: &str) -> ActorId {
        let id = ActorId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let actor = Actor {
            id,
            name: name.to_owned(),
            level: 1,
            xp: 0,
            gold: 0,
            is_active: true,
        };
        self.actors.write().insert(id, actor);
        tracing::info!("registered {id} ({name})");
        id
    }

    /// Copies out an actor's current state.
    #[must_use]
    pub fn snapshot(&self, id: ActorId) -> Option<Actor> {
        self.actors.read().get(&id).cloned()
    }

    /// Active actors an attacker may target: everyone active except
    /// themselves, strongest first.
    #[must_use]
    pub fn opponents_for(&self, id: ActorId) -> Vec<Actor> {
        let mut opponents: Vec<Actor> = self
            .actors
            .read()
            .values()
            .filter(|a| a.is_active && a.id != id)
            .cloned()
            .collect();
        opponents.sort_by(|a, b| b.level.cmp(&a.level).then(a.id.cmp(&b.id)));
        opponents
    }

    /// Grants XP atomically: read, convert through the ledger, write - all
    /// under the write lock. Returns `None` for unknown actors.
    pub fn grant_xp(&self, id: ActorId, amount: u64) -> Option<XpGrant> {
        let mut actors = self.actors.write();
        let actor = actors.get_mut(&id)?;
        let grant = ledger::grant_xp(actor.xp, amount);
        actor.xp = grant.new_xp;
        actor.level = grant.new_level;
        Some(grant)
    }

    /// Adds gold. Returns the new balance, or `None` for unknown actors.
    pub fn credit_gold(&self, id: ActorId, amount: u64) -> Option<u64> {
        let mut actors = self.actors.write();
        let actor = actors.get_mut(&id)?;
        actor.gold = actor.gold.saturating_add(amount);
        Some(actor.gold)
    }

    /// Removes gold, stopping at zero - an actor can lose at most what
    /// they have. Returns the new balance, or `None` for unknown actors.
    pub fn debit_gold(&self, id: ActorId, amount: u64) -> Option<u64> {
        let mut actors = self.actors.write();
        let actor = actors.get_mut(&id)?;
        actor.gold = actor.gold.saturating_sub(amount);
        Some(actor.gold)
    }

    /// Deactivates an actor. They keep their history; they stop acting.
    pub fn deactivate(&self, id: ActorId) -> bool {
        let mut actors = self.actors.write();
        match actors.get_mut(&id) {
            Some(actor) => {
                actor.is_active = false;
                tracing::info!("deactivated {id}");
                true
            }
            None => false,
        }
    }

    /// Admin reset: back to level 1, zero XP. Gold is untouched.
    pub fn reset_progress(&self, id: ActorId) -> bool {
        let mut actors = self.actors.write();
        match actors.get_mut(&id) {
            Some(actor) => {
                actor.xp = 0;
                actor.level = 1;
                tracing::info!("reset progress for {id}");
                true
            }
            None => false,
        }
    }
}

impl Default for ActorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
