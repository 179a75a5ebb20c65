//! Shared setup for commands that talk to the actor store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use swnr_content::ContentFactory;
use swnr_runtime::{FileActorRepository, Runtime, RuntimeConfig};

use crate::dirs;

/// Directory options accepted by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct Dirs {
    /// Content directory (engine.toml, presets.toml, actors.ron)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Actor store directory
    #[arg(long, global = true, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,
}

impl Dirs {
    pub fn content(&self) -> ContentFactory {
        ContentFactory::new(self.data_dir.clone().unwrap_or_else(dirs::data_dir))
    }

    pub fn store(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(dirs::store_dir)
    }

    /// Starts a runtime over the file store, configured from the content
    /// directory.
    pub async fn runtime(&self) -> Result<Runtime> {
        let engine = self.content().load_config()?;
        let store = self.store();
        let repository = FileActorRepository::new(&store)
            .with_context(|| format!("Failed to open actor store: {}", store.display()))?;

        let runtime = Runtime::builder()
            .config(RuntimeConfig::from_env().with_engine(engine))
            .repository(Arc::new(repository))
            .build()
            .await?;
        Ok(runtime)
    }
}
