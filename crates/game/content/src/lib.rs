//! Data-driven content definitions and loaders.
//!
//! This crate houses the static data a campaign runs on and provides loaders
//! for RON/TOML files:
//! - Actor catalogs (data-driven via RON)
//! - Power presets per sub-type (data-driven via TOML)
//! - Engine configuration (data-driven via TOML)
//!
//! All loaders use swnr-core types directly with serde for RON/TOML
//! deserialization.

pub mod presets;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use presets::PresetTable;

#[cfg(feature = "loaders")]
pub use loaders::{ActorLoader, ConfigLoader, ContentFactory, PresetLoader};
