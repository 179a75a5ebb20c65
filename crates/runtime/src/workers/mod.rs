//! Worker tasks that back the runtime orchestration.
//!
//! The refresh worker owns the repository and processes every command in
//! arrival order.

mod refresh;

pub use refresh::{Command, RefreshWorker};
