//! Actor catalog loader.
//!
//! Loads actor records (characters, NPCs and the rest) from RON files.

use std::collections::HashSet;
use std::path::Path;

use swnr_core::ActorRecord;

use crate::loaders::{LoadResult, read_file};

/// Loader for actor catalogs from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load an actor catalog from a RON file.
    ///
    /// RON format: `Vec<ActorRecord>`
    ///
    /// Every record is validated and ids must be unique within the file.
    pub fn load(path: &Path) -> LoadResult<Vec<ActorRecord>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load actor catalog {}: {}", path.display(), e))
    }

    /// Parse an actor catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<ActorRecord>> {
        let actors: Vec<ActorRecord> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for actor in &actors {
            actor
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid actor '{}': {}", actor.id, e))?;
            if !seen.insert(actor.id.clone()) {
                anyhow::bail!("Duplicate actor id '{}'", actor.id);
            }
        }

        tracing::debug!("Loaded {} actors", actors.len());
        Ok(actors)
    }
}
