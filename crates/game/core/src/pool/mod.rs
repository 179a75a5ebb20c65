//! Resource pools: keys, cadences, grants, commitments and derivation.
//!
//! A pool is a named numeric bucket (`Effort:Psychic`, `Slots:Lv1`) whose
//! capacity comes from feature grants. Pools are derived, not stored: the
//! actor keeps only a [`PersistedPool`] snapshot per key, and
//! [`calculate_pools_from_features`] rebuilds the full [`Pool`] view on demand.
//!
//! Invariants after any derivation or refresh:
//! - `0 <= value <= max`
//! - `max = max(0, base_max + temp.sum())`

pub mod cadence;
pub mod commitment;
pub mod derive;
pub mod grant;
pub mod key;
pub mod state;

pub use cadence::{Cadence, CommitDuration};
pub use commitment::{Commitment, partition_released, total_committed};
pub use derive::{DerivedPools, PoolEvaluator, calculate_pools_from_features};
pub use grant::PoolGrant;
pub use key::{PoolKey, PoolKeyError, ResourceName};
pub use state::{PersistedPool, Pool, TempModifiers, max_with_temp};
