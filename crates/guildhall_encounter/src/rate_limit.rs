//! # Click Gate
//!
//! Per-actor rate limiting for boss hits. The contract is best-effort
//! (~2 hits/second), but check-and-stamp happens under one mutex so the
//! gate cannot be raced from within a single process.
//!
//! A passed gate can be rolled back: if the hit is later rejected (stale
//! boss), the stamp is restored so the rejection leaves no state behind.

use std::collections::HashMap;

use parking_lot::Mutex;

use guildhall_shared::{ActorId, Timestamp};

use crate::error::{EncounterError, EncounterResult};

/// Token proving an actor passed the gate; consumed by [`ClickGate::rollback`]
/// if the hit does not go through.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GatePass {
    previous: Option<Timestamp>,
}

/// Per-actor minimum-interval gate.
pub(crate) struct ClickGate {
    min_interval_ms: u64,
    last_hit: Mutex<HashMap<ActorId, Timestamp>>,
}

impl ClickGate {
    pub(crate) fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_hit: Mutex::new(HashMap::new()),
        }
    }

    /// Checks the interval and stamps `now` in one critical section.
    pub(crate) fn try_pass(&self, actor_id: ActorId, now: Timestamp) -> EncounterResult<GatePass> {
        let mut last_hit = self.last_hit.lock();

        if let Some(&last) = last_hit.get(&actor_id) {
            let elapsed = now.millis_since(last);
            if elapsed < self.min_interval_ms {
                return Err(EncounterError::RateLimited {
                    retry_after_ms: self.min_interval_ms - elapsed,
                });
            }
        }

        let previous = last_hit.insert(actor_id, now);
        Ok(GatePass { previous })
    }

    /// Restores the stamp a [`GatePass`] replaced.
    pub(crate) fn rollback(&self, actor_id: ActorId, pass: GatePass) {
        let mut last_hit = self.last_hit.lock();
        match pass.previous {
            Some(previous) => {
                last_hit.insert(actor_id, previous);
            }
            None => {
                last_hit.remove(&actor_id);
            }
        }
    }
}
