//! # GUILDHALL Boss Encounter
//!
//! One shared boss, many independent attackers. Every actor's click becomes
//! a damage application against a single hit point pool; the pool pays out
//! XP per point of damage, and whoever lands the final blow triggers the
//! defeat transition and the immediate provisioning of a fresh boss.
//!
//! ## Concurrency
//!
//! The reference behavior this replaces suffered two races: lost HP updates
//! (read-compute-write) and duplicate active bosses (check-then-act). Both
//! are closed here:
//!
//! - HP is an atomic counter decremented by compare-exchange with a clamp
//!   at zero; exactly one caller observes the transition to zero
//! - The active boss lives in a single lock-guarded slot; creation is
//!   create-if-absent under the write lock
//!
//! The per-actor click gate stays best-effort by contract, but within one
//! process it is exact.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod boss;
pub mod damage_log;
pub mod encounter;
pub mod error;
mod rate_limit;

pub use boss::{hit_damage, BossSettings, BossSnapshot};
pub use damage_log::{DamageEvent, DamageLog, LeaderboardEntry};
pub use encounter::{DamageOutcome, DamageUpgrades, Encounter};
pub use error::{EncounterError, EncounterResult};
