//! Load actors from the content catalog into the store.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use swnr_content::ActorLoader;

use crate::context::Dirs;

/// Import actors from a RON catalog
#[derive(Parser)]
pub struct Import {
    /// Catalog to read (defaults to actors.ron in the data directory)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Overwrite actors that are already stored
    #[arg(long)]
    replace: bool,
}

impl Import {
    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let actors = match &self.file {
            Some(path) => ActorLoader::load(path)?,
            None => dirs.content().load_actors()?,
        };

        let runtime = dirs.runtime().await?;
        let handle = runtime.handle();
        let existing = handle.list_actors().await?;

        let mut imported = 0usize;
        for actor in actors {
            if existing.contains(&actor.id) && !self.replace {
                println!(
                    "  {} {} (already stored, use --replace)",
                    style("skip").yellow(),
                    actor.id
                );
                continue;
            }
            println!("  {} {} ({})", style("save").green(), actor.id, actor.kind);
            handle.save_actor(actor).await?;
            imported += 1;
        }
        drop(handle);

        println!();
        println!(
            "{} {} actor(s) into {}",
            style("Imported").bold().green(),
            imported,
            dirs.store().display()
        );

        runtime.shutdown().await?;
        Ok(())
    }
}
