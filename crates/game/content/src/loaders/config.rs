//! Engine configuration loader.

use std::path::Path;

use swnr_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their defaults.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.limits.max_len == 0 || config.limits.max_depth == 0 {
            anyhow::bail!("Expression limits must be greater than zero");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swnr_core::ActorKind;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn overrides_selected_fields() {
        let config = ConfigLoader::parse(
            r#"
            strain_recovery_per_day = 2
            commitment_kinds = ["character", "npc"]

            [limits]
            max_depth = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.strain_recovery_per_day, 2);
        assert!(config.tracks_commitments(ActorKind::Npc));
        assert_eq!(config.limits.max_depth, 8);
        assert_eq!(config.limits.max_len, 512);
        assert!(!config.in_default_batch(ActorKind::Faction));
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert!(ConfigLoader::parse("[limits]\nmax_len = 0").is_err());
    }
}
