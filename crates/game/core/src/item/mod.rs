//! Items owned by an actor.
//!
//! The engine reads three kinds: features (pool grants), powers (commitments,
//! consumptions, prepared flags) and skills (formula references). Everything
//! else is carried as [`ItemData::Gear`] so that records round-trip intact.

pub mod feature;
pub mod power;
pub mod skill;

use core::fmt;

pub use feature::FeatureData;
pub use power::{Consumption, ConsumptionKind, PowerData, PowerPreset, PowerSubType};
pub use skill::{SkillData, SkillSource};

/// Unique identifier for an item within its owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Item payload by type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemData {
    Feature(FeatureData),
    Power(PowerData),
    Skill(SkillData),
    Gear,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub data: ItemData,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, data: ItemData) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data,
        }
    }

    pub fn feature(id: impl Into<ItemId>, name: impl Into<String>, data: FeatureData) -> Self {
        Self::new(id, name, ItemData::Feature(data))
    }

    pub fn power(id: impl Into<ItemId>, name: impl Into<String>, data: PowerData) -> Self {
        Self::new(id, name, ItemData::Power(data))
    }

    pub fn skill(id: impl Into<ItemId>, name: impl Into<String>, data: SkillData) -> Self {
        Self::new(id, name, ItemData::Skill(data))
    }

    pub fn as_power(&self) -> Option<&PowerData> {
        match &self.data {
            ItemData::Power(power) => Some(power),
            _ => None,
        }
    }

    pub fn as_power_mut(&mut self) -> Option<&mut PowerData> {
        match &mut self.data {
            ItemData::Power(power) => Some(power),
            _ => None,
        }
    }

    pub fn as_skill(&self) -> Option<&SkillData> {
        match &self.data {
            ItemData::Skill(skill) => Some(skill),
            _ => None,
        }
    }
}
