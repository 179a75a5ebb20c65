//! Content factory for loading campaign data from a directory.

use std::path::{Path, PathBuf};

use swnr_core::{ActorRecord, EngineConfig};

use crate::loaders::{ActorLoader, ConfigLoader, LoadResult, PresetLoader};
use crate::presets::PresetTable;

/// Content factory that loads all campaign content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── engine.toml
/// ├── presets.toml
/// └── actors.ron
/// ```
///
/// `engine.toml` and `presets.toml` are optional; missing files fall back to
/// the built-in defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "engine.toml";
    pub const PRESETS_FILE: &'static str = "presets.toml";
    pub const ACTORS_FILE: &'static str = "actors.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `engine.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} in {}, using defaults", Self::CONFIG_FILE, self.data_dir.display());
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load power presets from `presets.toml`.
    pub fn load_presets(&self) -> LoadResult<PresetTable> {
        let path = self.data_dir.join(Self::PRESETS_FILE);
        if !path.exists() {
            return Ok(PresetTable::builtin());
        }
        PresetLoader::load(&path)
    }

    /// Load the actor catalog from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<Vec<ActorRecord>> {
        let path = self.data_dir.join(Self::ACTORS_FILE);
        ActorLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
