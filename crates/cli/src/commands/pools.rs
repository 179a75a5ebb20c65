//! Per-actor pool commands.

use anyhow::Result;
use clap::Parser;
use console::style;

use swnr_core::{DerivedPools, PoolKey, PoolOverride, TempModifiers};

use super::print_json;
use crate::context::Dirs;

/// Show an actor's derived pools
#[derive(Parser)]
pub struct Pools {
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

impl Pools {
    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let runtime = dirs.runtime().await?;
        let pools = runtime.handle().derive_pools(self.actor.as_str()).await?;
        runtime.shutdown().await?;

        if self.json {
            return print_json(&pools);
        }
        print_pools(&self.actor, &pools);
        Ok(())
    }
}

pub(crate) fn print_pools(actor: &str, pools: &DerivedPools) {
    if pools.is_empty() {
        println!("{} has no pools", actor);
        return;
    }

    println!("{}", style("Pools:").bold().yellow());
    for (key, pool) in pools.iter() {
        let committed = match pool.committed {
            Some(amount) if amount > 0 => format!(", {} committed", amount),
            _ => String::new(),
        };
        println!(
            "  {:<18} {}/{} ({}{})",
            key.to_string(),
            pool.value,
            pool.max,
            pool.cadence,
            committed
        );
        for commitment in pool.commitments.iter().flatten() {
            println!(
                "    {} {} ({})",
                style("-").dim(),
                commitment.power_name,
                commitment.duration
            );
        }
    }
}

/// Refill named pools to max regardless of cadence
#[derive(Parser)]
pub struct Refill {
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Pool keys such as Effort:Psychic
    #[arg(value_name = "POOL", required_unless_present = "all")]
    pools: Vec<PoolKey>,

    /// Refill every pool the actor has
    #[arg(long, conflicts_with = "pools")]
    all: bool,
}

impl Refill {
    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let runtime = dirs.runtime().await?;
        let handle = runtime.handle();
        let keys = if self.all {
            let pools = handle.derive_pools(self.actor.as_str()).await?;
            pools.keys().cloned().collect()
        } else {
            self.pools
        };
        let result = handle.refill_pools(self.actor.as_str(), keys).await?;
        drop(handle);
        runtime.shutdown().await?;

        for pool in &result.pools {
            println!(
                "  {} {} {} -> {}/{}",
                style("refilled").green(),
                pool.key,
                pool.old_value,
                pool.new_value,
                pool.max
            );
        }
        for key in &result.unknown {
            println!("  {} {} (no such pool)", style("skipped").yellow(), key);
        }
        if result.pools.is_empty() && result.unknown.is_empty() {
            println!("Nothing to refill");
        }
        Ok(())
    }
}

/// Override a pool's value or temp modifiers
#[derive(Parser)]
#[command(group(
    clap::ArgGroup::new("change")
        .required(true)
        .multiple(true)
        .args(["value", "temp_commit", "temp_scene", "temp_day"])
))]
pub struct Set {
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Pool key such as Effort:Psychic
    #[arg(value_name = "POOL")]
    pool: PoolKey,

    /// New current value, clamped to 0..=max
    #[arg(long, allow_negative_numbers = true)]
    value: Option<i64>,

    /// Temp modifier kept until changed by hand
    #[arg(long, allow_negative_numbers = true)]
    temp_commit: Option<i32>,

    /// Temp modifier cleared by the next scene or day refresh
    #[arg(long, allow_negative_numbers = true)]
    temp_scene: Option<i32>,

    /// Temp modifier cleared by the next day refresh
    #[arg(long, allow_negative_numbers = true)]
    temp_day: Option<i32>,
}

impl Set {
    fn touches_temp(&self) -> bool {
        self.temp_commit.is_some() || self.temp_scene.is_some() || self.temp_day.is_some()
    }

    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let runtime = dirs.runtime().await?;
        let handle = runtime.handle();

        // Temp flags replace single components; the rest keep their value.
        let temp = if self.touches_temp() {
            let pools = handle.derive_pools(self.actor.as_str()).await?;
            let current = pools
                .get(&self.pool)
                .map(|pool| pool.temp)
                .unwrap_or_default();
            Some(TempModifiers {
                commit: self.temp_commit.unwrap_or(current.commit),
                scene: self.temp_scene.unwrap_or(current.scene),
                day: self.temp_day.unwrap_or(current.day),
            })
        } else {
            None
        };

        let change = PoolOverride {
            value: self.value,
            temp,
        };
        let pool = handle
            .override_pool(self.actor.as_str(), self.pool.clone(), change)
            .await?;
        drop(handle);
        runtime.shutdown().await?;

        println!(
            "  {} {} {}/{} (temp {:+}/{:+}/{:+})",
            style("set").green(),
            self.pool,
            pool.value,
            pool.max,
            pool.temp.commit,
            pool.temp.scene,
            pool.temp.day
        );
        Ok(())
    }
}

/// Release the effort a power has committed to a pool
#[derive(Parser)]
pub struct Release {
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Pool key such as Effort:Psychic
    #[arg(value_name = "POOL")]
    pool: PoolKey,

    /// Item id of the committing power
    #[arg(value_name = "POWER")]
    power: String,
}

impl Release {
    pub async fn execute(self, dirs: &Dirs) -> Result<()> {
        let runtime = dirs.runtime().await?;
        let released = runtime
            .handle()
            .release_commitment(self.actor.as_str(), self.pool, self.power.as_str())
            .await?;
        runtime.shutdown().await?;

        for effort in &released {
            println!(
                "  {} {} {} from {}",
                style("released").green(),
                effort.amount,
                effort.key,
                effort.power_name
            );
        }
        Ok(())
    }
}
