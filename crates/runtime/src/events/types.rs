//! Event payloads published by the refresh worker.

use serde::{Deserialize, Serialize};
use swnr_core::{
    ActorId, Pool, PoolKey, PoolRefresh, RefreshCadence, RefreshSummary, ReleasedEffort,
};

/// Refresh lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RefreshEvent {
    /// An actor was refreshed. `revision` is `None` when nothing was
    /// committed (dry run or no changes).
    ActorRefreshed {
        summary: RefreshSummary,
        revision: Option<u64>,
    },

    /// An actor in a batch failed; the batch continued.
    ActorFailed {
        actor_id: ActorId,
        cadence: RefreshCadence,
        error: String,
    },

    /// A batch refresh finished.
    BatchCompleted {
        cadence: RefreshCadence,
        refreshed: usize,
        failed: usize,
    },

    /// Named pools were refilled by hand.
    PoolsRefilled {
        actor_id: ActorId,
        pools: Vec<PoolRefresh>,
    },

    /// A pool's value or temp modifiers were set by hand.
    PoolOverridden {
        actor_id: ActorId,
        key: PoolKey,
        pool: Pool,
    },
}

/// Commitment events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommitmentEvent {
    Released {
        actor_id: ActorId,
        released: Vec<ReleasedEffort>,
    },
}
