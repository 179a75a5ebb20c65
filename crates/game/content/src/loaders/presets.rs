//! Power preset loader.

use std::collections::BTreeMap;
use std::path::Path;

use swnr_core::{PowerPreset, PowerSubType};

use crate::loaders::{LoadResult, read_file};
use crate::presets::PresetTable;

/// Loader for power preset overrides from TOML files.
pub struct PresetLoader;

impl PresetLoader {
    /// Load preset overrides from a TOML file on top of the built-in table.
    ///
    /// File format: one table per sub-type.
    ///
    /// ```toml
    /// [psychic]
    /// resource_name = "Effort"
    /// sub_resource = "Psychic"
    /// resource_cost = 1
    /// shared_resource = true
    /// resource_length = "scene"
    /// ```
    pub fn load(path: &Path) -> LoadResult<PresetTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PresetTable> {
        let overrides: BTreeMap<PowerSubType, PowerPreset> = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse presets TOML: {}", e))?;

        let mut table = PresetTable::builtin();
        for (sub_type, preset) in overrides {
            table.insert(sub_type, preset);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swnr_core::{Cadence, ResourceName};

    #[test]
    fn overrides_only_listed_sub_types() {
        let table = PresetLoader::parse(
            r#"
            [mutation]
            resource_name = "Uses"
            resource_cost = 1
            resource_length = "scene"
            "#,
        )
        .unwrap();
        let mutation = table.get(PowerSubType::Mutation);
        assert_eq!(mutation.resource_cost, 1);
        assert_eq!(mutation.resource_length, Cadence::Scene);
        assert!(!mutation.shared_resource);
        assert_eq!(table.get(PowerSubType::Psychic).resource_name, ResourceName::Effort);
    }

    #[test]
    fn unknown_sub_type_is_an_error() {
        assert!(PresetLoader::parse("[ritual]\nresource_name = \"Effort\"").is_err());
    }
}
