//! Full view of one stored actor.

use anyhow::Result;
use clap::Parser;
use console::style;
use serde::Serialize;

use swnr_core::{ActorRecord, DerivedSheet};

use super::pools::print_pools;
use super::print_json;
use crate::context::Dirs;

/// Inspect an actor's record and derived sheet
#[derive(Parser)]
pub struct Inspect {
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    record: &'a ActorRecord,
    derived: &'a DerivedSheet,
}

impl Inspect {
    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let runtime = dirs.runtime().await?;
        let handle = runtime.handle();
        let record = handle.actor(self.actor.as_str()).await?;
        let derived = handle.derive_sheet(self.actor.as_str()).await?;
        drop(handle);
        runtime.shutdown().await?;

        if self.json {
            return print_json(&InspectOutput {
                record: &record,
                derived: &derived,
            });
        }

        println!(
            "{} {} ({}, level {}, revision {})",
            style("Actor:").bold().cyan(),
            record.name,
            record.kind,
            record.level,
            record.revision
        );
        println!(
            "{} {}/{}",
            style("HP:").bold().cyan(),
            record.health.value,
            record.health.max
        );
        println!(
            "{} {}/{}",
            style("System strain:").bold().cyan(),
            record.system_strain.value,
            derived.strain_max
        );
        println!();

        println!("{}", style("Stats:").bold().yellow());
        for (kind, values) in &derived.stats {
            println!("  {:<4} {:>3} ({:+})", kind.to_string(), values.total, values.modifier);
        }
        println!();

        println!("{}", style("Saves:").bold().yellow());
        println!(
            "  Physical {}  Evasion {}  Mental {}  Luck {}",
            derived.saves.physical, derived.saves.evasion, derived.saves.mental, derived.saves.luck
        );
        println!();

        print_pools(&self.actor, &derived.pools);

        let powers: Vec<_> = record.powers().collect();
        if !powers.is_empty() {
            println!();
            println!("{}", style("Powers:").bold().yellow());
            for (item, power) in powers {
                let prepared = if power.prepared { ", prepared" } else { "" };
                println!(
                    "  {} ({}, {}{})",
                    item.name,
                    power.sub_type,
                    power.resource_key(),
                    prepared
                );
            }
        }
        Ok(())
    }
}
