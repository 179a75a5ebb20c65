//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod eval;
mod import;
mod inspect;
mod pools;
mod refresh;
mod status;

pub use eval::Eval;
pub use import::Import;
pub use inspect::Inspect;
pub use pools::{Pools, Refill, Release, Set};
pub use refresh::Refresh;
pub use status::Status;

use anyhow::{Context, Result};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;
    println!("{}", json);
    Ok(())
}
