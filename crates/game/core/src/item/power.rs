//! Powers: psychic disciplines, arts, adept powers, spells and mutations.

use crate::pool::{Cadence, PoolKey, ResourceName};

// ============================================================================
// Sub-types & presets
// ============================================================================

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PowerSubType {
    #[default]
    Psychic,
    Art,
    Adept,
    Spell,
    Mutation,
}

/// Resource defaults applied when a power of a given sub-type is created.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerPreset {
    pub resource_name: ResourceName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_resource: String,
    pub resource_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shared_resource: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub leveled_resource: bool,
    pub resource_length: Cadence,
}

impl PowerPreset {
    /// Built-in preset for `sub_type`.
    pub fn for_sub_type(sub_type: PowerSubType) -> Self {
        let (resource_name, sub_resource, resource_cost, resource_length) = match sub_type {
            PowerSubType::Psychic => (ResourceName::Effort, "Psychic", 1, Cadence::Scene),
            PowerSubType::Art => (ResourceName::Effort, "", 1, Cadence::Day),
            PowerSubType::Adept => (ResourceName::Effort, "Adept", 1, Cadence::Day),
            PowerSubType::Spell => (ResourceName::Slots, "", 1, Cadence::Day),
            PowerSubType::Mutation => (ResourceName::Uses, "", 0, Cadence::Day),
        };

        Self {
            resource_name,
            sub_resource: sub_resource.to_string(),
            resource_cost,
            shared_resource: !matches!(sub_type, PowerSubType::Mutation),
            leveled_resource: matches!(sub_type, PowerSubType::Spell),
            resource_length,
        }
    }
}

// ============================================================================
// Consumption
// ============================================================================

/// What one use of a power costs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumptionKind {
    #[default]
    None,
    /// Internal counter refilled at the consumption's cadence.
    Uses { value: u32, max: u32 },
    SystemStrain { cost: u32 },
    /// Effort drawn from a pool.
    #[cfg_attr(feature = "serde", serde(alias = "PoolResource"))]
    SourceEffort { key: PoolKey, cost: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Consumption {
    pub kind: ConsumptionKind,
    pub cadence: Option<Cadence>,
    /// Paid when preparing rather than when casting.
    pub spend_on_prep: bool,
}

impl Consumption {
    pub fn uses(value: u32, max: u32, cadence: Cadence) -> Self {
        Self {
            kind: ConsumptionKind::Uses { value, max },
            cadence: Some(cadence),
            spend_on_prep: false,
        }
    }

    pub fn spent_on_prep(mut self) -> Self {
        self.spend_on_prep = true;
        self
    }

    /// `(value, max)` for `Uses` consumptions.
    pub fn uses_counter(&self) -> Option<(u32, u32)> {
        match self.kind {
            ConsumptionKind::Uses { value, max } => Some((value, max)),
            _ => None,
        }
    }
}

// ============================================================================
// Power data
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PowerData {
    pub sub_type: PowerSubType,
    /// Power level, 1 through 9.
    pub level: u32,
    pub prepared: bool,
    pub resource_name: ResourceName,
    pub sub_resource: String,
    pub resource_cost: u32,
    pub shared_resource: bool,
    pub leveled_resource: bool,
    pub resource_length: Cadence,
    pub consumptions: Vec<Consumption>,
}

impl PowerData {
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 9;

    pub fn new(sub_type: PowerSubType) -> Self {
        let mut power = Self {
            sub_type,
            level: Self::MIN_LEVEL,
            prepared: false,
            resource_name: ResourceName::Effort,
            sub_resource: String::new(),
            resource_cost: 1,
            shared_resource: true,
            leveled_resource: false,
            resource_length: Cadence::Scene,
            consumptions: Vec::new(),
        };
        power.apply_preset(&PowerPreset::for_sub_type(sub_type));
        power
    }

    pub fn apply_preset(&mut self, preset: &PowerPreset) {
        self.resource_name = preset.resource_name;
        self.sub_resource = preset.sub_resource.clone();
        self.resource_cost = preset.resource_cost;
        self.shared_resource = preset.shared_resource;
        self.leveled_resource = preset.leveled_resource;
        self.resource_length = preset.resource_length;
    }

    /// Pool this power draws from.
    pub fn resource_key(&self) -> PoolKey {
        PoolKey::new(self.resource_name, self.sub_resource.clone())
    }

    /// True if the power costs anything to use.
    pub fn has_consumption(&self) -> bool {
        self.resource_cost > 0
            || self
                .consumptions
                .iter()
                .any(|c| !matches!(c.kind, ConsumptionKind::None))
    }
}

impl Default for PowerData {
    fn default() -> Self {
        Self::new(PowerSubType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psychic_preset_draws_scene_effort() {
        let power = PowerData::new(PowerSubType::Psychic);
        assert_eq!(power.resource_key().to_string(), "Effort:Psychic");
        assert_eq!(power.resource_cost, 1);
        assert_eq!(power.resource_length, Cadence::Scene);
    }

    #[test]
    fn spell_preset_uses_leveled_day_slots() {
        let preset = PowerPreset::for_sub_type(PowerSubType::Spell);
        assert_eq!(preset.resource_name, ResourceName::Slots);
        assert!(preset.leveled_resource);
        assert!(preset.shared_resource);
        assert_eq!(preset.resource_length, Cadence::Day);
    }

    #[test]
    fn mutation_preset_is_free_and_unshared() {
        let power = PowerData::new(PowerSubType::Mutation);
        assert_eq!(power.resource_key().to_string(), "Uses:");
        assert!(!power.shared_resource);
        assert!(!power.has_consumption());
    }

    #[test]
    fn uses_counter_only_for_uses() {
        assert_eq!(Consumption::uses(1, 3, Cadence::Day).uses_counter(), Some((1, 3)));
        let strain = Consumption {
            kind: ConsumptionKind::SystemStrain { cost: 1 },
            ..Consumption::default()
        };
        assert_eq!(strain.uses_counter(), None);
    }
}
