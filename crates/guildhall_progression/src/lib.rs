//! # GUILDHALL Progression
//!
//! The leveling ledger and every way XP enters the economy.
//!
//! ## Design Principles
//!
//! 1. **Pure conversion** - [`ledger`] turns XP into levels with no side
//!    effects; everything else in the workspace depends on it
//! 2. **Clamp, never trust** - client-reported numbers pass through
//!    [`caps`] before touching the ledger
//! 3. **Explicit time** - callers supply `now`; nothing here reads a clock
//!
//! ## Example
//!
//! ```rust,ignore
//! use guildhall_progression::ledger;
//!
//! let grant = ledger::grant_xp(90, 25);
//! assert!(grant.leveled_up); // 90 + 25 = 115 XP, level 1 -> 2
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod caps;
pub mod error;
pub mod import;
pub mod ledger;
pub mod praise;

pub use error::{ProgressionError, ProgressionResult};
pub use import::{ImportReceipt, XpImporter};
pub use ledger::{grant_xp, level_for_xp, XpGrant};
pub use praise::{PraiseBook, PraiseReceipt, PraiseStatus, PraiserRanking};
