//! # GUILDHALL Arena
//!
//! One-shot PvP. A duel is resolved entirely from the two actors' current
//! levels: the attacker's single blow either meets the defender's effective
//! HP bar or it does not. No persistent combat state, no retaliation turn -
//! the defender risks nothing but gold.
//!
//! ## Pipeline
//!
//! ```text
//! resolve() ->
//!   1. Validate (self-attack, defender active)
//!   2. Cooldown gate (30s per attacker)
//!   3. Pure math: damage, HP bar, level-diff multiplier
//!   4. Rewards: winner takes XP + gold, loser consolation XP
//!   5. Append DuelRecord, update both DuelStats rows
//! ```
//!
//! Steps 1-2 reject without touching state.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod arena;
pub mod error;
pub mod records;
pub mod resolver;
pub mod stats;

pub use arena::{Arena, DuelOutcome, DuelistProfile};
pub use error::{ArenaError, ArenaResult};
pub use records::{DuelLedger, DuelNotification, DuelRecord};
pub use resolver::{DuelComputation, RewardSplit};
pub use stats::{ArenaRanking, DuelStats, StatsBook};
