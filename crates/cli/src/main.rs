//! Command line front end for the SWN resource pool engine.
//!
//! Run with: `swnr <command>`. Directories come from flags, the environment
//! or a `.env` file (see [`dirs`]).

mod commands;
mod context;
mod dirs;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Eval, Import, Inspect, Pools, Refill, Refresh, Release, Set, Status};
use context::Dirs;

/// Resource pools, effort and refreshes for SWN actors
#[derive(Parser)]
#[command(name = "swnr")]
#[command(about = "Resource pool engine for SWN actors", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    dirs: Dirs,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Import actors from a RON catalog into the store
    Import(Import),

    /// Refresh actors at scene or day cadence
    Refresh(Refresh),

    /// List depleted pools by cadence
    Status(Status),

    /// Show an actor's pools
    Pools(Pools),

    /// Refill named pools on an actor
    Refill(Refill),

    /// Set a pool's value or temp modifiers by hand
    Set(Set),

    /// Release a power's committed effort
    Release(Release),

    /// Evaluate a formula against an actor
    Eval(Eval),

    /// Inspect an actor's record and derived sheet
    Inspect(Inspect),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for SWNR_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(&dirs::log_dir(), cli.verbose)?;

    run(cli.command, &cli.dirs).await
}

async fn run(command: Command, dirs: &Dirs) -> Result<()> {
    match command {
        Command::Import(cmd) => cmd.execute(dirs).await,
        Command::Refresh(cmd) => cmd.execute(dirs).await,
        Command::Status(cmd) => cmd.execute(dirs).await,
        Command::Pools(cmd) => cmd.execute(dirs).await,
        Command::Refill(cmd) => cmd.execute(dirs).await,
        Command::Set(cmd) => cmd.execute(dirs).await,
        Command::Release(cmd) => cmd.execute(dirs).await,
        Command::Eval(cmd) => cmd.execute(dirs).await,
        Command::Inspect(cmd) => cmd.execute(dirs).await,
    }
}
