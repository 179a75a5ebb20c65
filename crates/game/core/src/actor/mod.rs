//! Actor records.
//!
//! An [`ActorRecord`] is the stored state of a character, NPC or other sheet:
//! stats, meters, persisted pool snapshots, effort commitments and items.
//! Everything else (modifiers, saves, pool maxima) is derived on demand.

mod scope;
mod sheet;
mod validate;

use core::fmt;
use std::collections::BTreeMap;

pub use scope::ActorScope;
pub use sheet::DerivedSheet;
pub use validate::ValidationError;

use crate::config::EngineConfig;
use crate::item::{Item, ItemId, PowerData};
use crate::pool::{
    Commitment, DerivedPools, PersistedPool, PoolKey, calculate_pools_from_features,
};
use crate::stats::{Meter, StatBlock, SystemStrain};

/// Unique identifier for an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorId(pub String);

impl ActorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ids are restricted to ASCII alphanumerics, `-` and `_` so they can
    /// name files.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ActorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Actor sheet type.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActorKind {
    #[default]
    Character,
    Npc,
    Faction,
    Ship,
    Vehicle,
    Mech,
    Drone,
    Cyberdeck,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorRecord {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub level: u32,
    pub stats: StatBlock,
    pub health: Meter,
    pub system_strain: SystemStrain,
    /// Persisted pool snapshots keyed by pool key.
    pub pools: BTreeMap<PoolKey, PersistedPool>,
    pub effort_commitments: BTreeMap<PoolKey, Vec<Commitment>>,
    pub items: Vec<Item>,
    /// Bumped by every committed update.
    pub revision: u64,
}

impl ActorRecord {
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    pub fn powers(&self) -> impl Iterator<Item = (&Item, &PowerData)> {
        self.items
            .iter()
            .filter_map(|item| item.as_power().map(|power| (item, power)))
    }

    pub fn tracks_commitments(&self, config: &EngineConfig) -> bool {
        config.tracks_commitments(self.kind)
    }

    pub fn scope<'a>(&'a self, config: &'a EngineConfig) -> ActorScope<'a> {
        ActorScope::new(self, &config.limits)
    }

    /// Derives the current pool view from features and persisted state.
    pub fn derive_pools(&self, config: &EngineConfig) -> DerivedPools {
        let commitments = self
            .tracks_commitments(config)
            .then_some(&self.effort_commitments);
        calculate_pools_from_features(&self.items, &self.pools, commitments, &self.scope(config))
    }

    pub fn derive(&self, config: &EngineConfig) -> DerivedSheet {
        DerivedSheet::compute(self, config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_actor(self)
    }
}

impl Default for ActorRecord {
    fn default() -> Self {
        Self {
            id: ActorId::default(),
            name: String::new(),
            kind: ActorKind::default(),
            level: 1,
            stats: StatBlock::default(),
            health: Meter::default(),
            system_strain: SystemStrain::default(),
            pools: BTreeMap::new(),
            effort_commitments: BTreeMap::new(),
            items: Vec::new(),
            revision: 0,
        }
    }
}
