//! Depleted pools across the store.

use anyhow::Result;
use clap::Parser;
use console::style;

use super::print_json;
use crate::context::Dirs;

/// Show pools below max, grouped by refresh cadence
#[derive(Parser)]
pub struct Status {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

impl Status {
    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let runtime = dirs.runtime().await?;
        let status = runtime.handle().refresh_status().await?;
        runtime.shutdown().await?;

        if self.json {
            return print_json(&status);
        }

        if status.is_empty() {
            println!("{}", style("All pools are full.").green());
            return Ok(());
        }

        for (cadence, pending) in &status.by_cadence {
            println!(
                "{} ({})",
                style(format!("Refills on {}", cadence)).bold().yellow(),
                pending.len()
            );
            for pool in pending {
                println!(
                    "  {:<20} {:<18} {}/{}",
                    pool.actor_name,
                    pool.key.to_string(),
                    pool.value,
                    pool.max
                );
            }
            println!();
        }
        Ok(())
    }
}
