//! Stat system for SWN actors.
//!
//! # Layers
//!
//! ```text
//! [ Stat scores (stored) ]  base / bonus / boost / temp
//!      ↓
//! [ Stat values (derived) ] total, modifier
//!      ↓
//! [ Saves, strain max ]
//! ```
//!
//! Only the scores and the current meter values are stored. Everything else
//! is recomputed on demand and never persisted.

pub mod core;
pub mod resources;
pub mod saves;

pub use core::{StatBlock, StatKind, StatScore, StatValues};
pub use resources::{Meter, SystemStrain};
pub use saves::Saves;
