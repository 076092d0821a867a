//! # GUILDHALL Shared Types
//!
//! Common vocabulary for the GUILDHALL progression and combat economy.
//!
//! Every other crate in the workspace speaks in these types:
//!
//! - [`ActorId`], [`BossId`], [`DuelId`] - opaque identifiers
//! - [`Timestamp`] - milliseconds since the Unix epoch
//! - [`Fixed`] - milli-unit fixed-point for all economy math
//! - [`constants`] - the balance sheet, one source of truth
//! - [`GameEvent`] - state transitions broadcast to collaborators
//!
//! ## Thread Safety
//!
//! Everything here is `Copy` or cheaply `Clone`. Locks and mutable state
//! live in the subsystem crates, never here.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod constants;
pub mod events;
pub mod ids;
pub mod math;
pub mod time;

pub use events::{EventType, GameEvent};
pub use ids::{ActorId, BossId, DuelId};
pub use math::Fixed;
pub use time::Timestamp;
