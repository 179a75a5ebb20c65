//! Power presets keyed by sub-type.
//!
//! New powers take their resource defaults from the preset of their
//! sub-type. The built-in table can be overridden per sub-type from
//! `presets.toml`; sub-types the file leaves out keep their built-in preset.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use swnr_core::{PowerData, PowerPreset, PowerSubType};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetTable {
    presets: BTreeMap<PowerSubType, PowerPreset>,
}

impl PresetTable {
    /// Table holding the built-in preset of every sub-type.
    pub fn builtin() -> Self {
        Self {
            presets: PowerSubType::iter()
                .map(|sub_type| (sub_type, PowerPreset::for_sub_type(sub_type)))
                .collect(),
        }
    }

    /// Replaces the preset for `sub_type`.
    pub fn insert(&mut self, sub_type: PowerSubType, preset: PowerPreset) {
        self.presets.insert(sub_type, preset);
    }

    pub fn get(&self, sub_type: PowerSubType) -> PowerPreset {
        self.presets
            .get(&sub_type)
            .cloned()
            .unwrap_or_else(|| PowerPreset::for_sub_type(sub_type))
    }

    /// Builds a fresh power of `sub_type` carrying this table's preset.
    pub fn new_power(&self, sub_type: PowerSubType) -> PowerData {
        let mut power = PowerData::new(sub_type);
        power.apply_preset(&self.get(sub_type));
        power
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PowerSubType, &PowerPreset)> {
        self.presets.iter()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swnr_core::{Cadence, ResourceName};

    #[test]
    fn builtin_covers_every_sub_type() {
        let table = PresetTable::builtin();
        assert_eq!(table.iter().count(), PowerSubType::iter().count());
        assert_eq!(table.get(PowerSubType::Mutation).resource_cost, 0);
    }

    #[test]
    fn override_applies_to_new_powers() {
        let mut table = PresetTable::builtin();
        let mut preset = table.get(PowerSubType::Art);
        preset.sub_resource = "Arcane".into();
        preset.resource_length = Cadence::Scene;
        table.insert(PowerSubType::Art, preset);

        let power = table.new_power(PowerSubType::Art);
        assert_eq!(power.resource_key().to_string(), "Effort:Arcane");
        assert_eq!(power.resource_length, Cadence::Scene);
        assert_eq!(
            table.new_power(PowerSubType::Spell).resource_name,
            ResourceName::Slots
        );
    }
}
