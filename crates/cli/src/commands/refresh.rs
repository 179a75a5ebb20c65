//! Scene and day refreshes.

use anyhow::Result;
use clap::Parser;
use console::style;

use swnr_core::{ActorId, RefreshCadence, RefreshOptions, RefreshSummary};
use swnr_runtime::BatchReport;

use super::print_json;
use crate::context::Dirs;

/// Refresh pools, commitments and uses at a cadence
#[derive(Parser)]
pub struct Refresh {
    /// Cadence to refresh at: scene or day
    #[arg(value_name = "CADENCE")]
    cadence: String,

    /// Actor to refresh (repeatable). Defaults to every character and NPC.
    #[arg(short, long = "actor", value_name = "ID")]
    actors: Vec<String>,

    /// Frail rest: restore no hit points on a day refresh
    #[arg(long)]
    frail: bool,

    /// Report what would change without saving
    #[arg(long)]
    dry_run: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,
}

impl Refresh {
    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let cadence: RefreshCadence = self.cadence.parse()?;
        let options = RefreshOptions {
            frail: self.frail,
            dry_run: self.dry_run,
        };
        let ids = if self.actors.is_empty() {
            None
        } else {
            Some(self.actors.into_iter().map(ActorId::from).collect())
        };

        let runtime = dirs.runtime().await?;
        let report = runtime
            .handle()
            .refresh_many(ids, cadence, options)
            .await?;
        runtime.shutdown().await?;

        if self.json {
            print_json(&report)?;
        } else {
            print_report(&report, self.dry_run);
        }

        if !report.is_success() {
            anyhow::bail!("{} actor(s) failed to refresh", report.failures.len());
        }
        Ok(())
    }
}

fn print_report(report: &BatchReport, dry_run: bool) {
    let title = format!("=== {} refresh ===", report.cadence);
    println!("{}", style(title).bold().green());
    if dry_run {
        println!("{}", style("(dry run, nothing saved)").dim());
    }
    println!();

    for summary in &report.refreshed {
        print_summary(summary);
    }

    for failure in &report.failures {
        println!(
            "{} {}: {}",
            style("FAILED").bold().red(),
            failure.actor_id,
            failure.error
        );
    }

    println!(
        "{} {} actors, {} pools, {} effort released, {} uses refilled, {} powers unprepared",
        style("Total:").bold().cyan(),
        report.actors_refreshed(),
        report.pools_refreshed(),
        report.effort_released(),
        report.consumption_uses_refreshed(),
        report.prepared_powers_unprepared()
    );
}

fn print_summary(summary: &RefreshSummary) {
    println!(
        "{} {}",
        style(&summary.actor_name).bold().yellow(),
        style(format!("[{}]", summary.actor_id)).dim()
    );

    if let Some(hp) = summary.health {
        println!("  HP {} -> {}", hp.before, hp.after);
    }
    if let Some(strain) = summary.system_strain {
        println!("  System strain {} -> {}", strain.before, strain.after);
    }
    for pool in &summary.pools {
        let reset = if pool.temp_reset { " (temp reset)" } else { "" };
        println!(
            "  {} {} -> {}/{}{}",
            pool.key, pool.old_value, pool.new_value, pool.max, reset
        );
    }
    for released in &summary.effort_released {
        println!(
            "  Released {} {} from {}",
            released.amount, released.key, released.power_name
        );
    }
    for uses in &summary.consumption_refreshes {
        println!(
            "  {} uses {} -> {}",
            uses.item_name, uses.old_value, uses.new_value
        );
    }
    for power in &summary.unprepared_powers {
        println!("  Unprepared {}", power.item_name);
    }
    println!();
}
