//! Content loaders for reading campaign data from files.
//!
//! Every loader reads a whole file, parses it with the matching format crate
//! and validates the result before handing it out.

pub mod actors;
pub mod config;
pub mod factory;
pub mod presets;

pub use actors::ActorLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use presets::PresetLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
