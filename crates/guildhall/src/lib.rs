//! # GUILDHALL
//!
//! The progression and combat economy behind the guild dashboard: a
//! leveling ledger, a cooperative boss encounter, and one-shot PvP duels,
//! coordinated by a single engine facade.
//!
//! ## Architecture
//!
//! ```text
//! dashboard actions ----> GuildhallEngine
//!                           |-- ActorRegistry (levels, XP, gold)
//!                           |-- Encounter     (shared boss HP pool)
//!                           |-- Arena         (duels, cooldowns, stats)
//!                           |-- PraiseBook / XpImporter (XP sources)
//!                           `-- event bus --> badge collaborator
//! ```
//!
//! The engine trusts the caller's identity completely (sessions are an
//! external concern) and trusts nothing else: every client-reported number
//! is clamped server-side before it touches a balance.
//!
//! ## Example
//!
//! ```rust,ignore
//! use guildhall::GuildhallEngine;
//!
//! let engine = GuildhallEngine::new();
//! let hero = engine.register_actor("Astrid");
//! let report = engine.attack_boss(hero, Default::default())?;
//! println!("dealt {} damage", report.outcome.actual_damage);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod actors;
pub mod config;
pub mod engine;
pub mod error;

pub use actors::{Actor, ActorRegistry};
pub use config::{BalanceConfig, ConfigError};
pub use engine::{
    BossAttackReport, DuelReport, GuildhallEngine, ImportReport, PraiseReport,
};
pub use error::{GuildhallError, GuildhallResult};
