use std::collections::BTreeMap;

use crate::actor::{ActorId, ActorRecord};
use crate::config::EngineConfig;
use crate::pool::{Cadence, PoolKey};

/// A pool below max that a refresh would top up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingPool {
    pub actor_id: ActorId,
    pub actor_name: String,
    pub key: PoolKey,
    pub value: u32,
    pub max: u32,
}

/// Depleted pools across actors, grouped by cadence.
///
/// `commit` pools are not listed on their own; they ride along with any
/// scene or day refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefreshStatus {
    pub by_cadence: BTreeMap<Cadence, Vec<PendingPool>>,
}

impl RefreshStatus {
    pub fn pending(&self, cadence: Cadence) -> &[PendingPool] {
        self.by_cadence.get(&cadence).map_or(&[], Vec::as_slice)
    }

    pub fn total(&self) -> usize {
        self.by_cadence.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Collects pools with `value < max` for every actor in the default batch.
pub fn refresh_status<'a>(
    actors: impl IntoIterator<Item = &'a ActorRecord>,
    config: &EngineConfig,
) -> RefreshStatus {
    let mut status = RefreshStatus::default();

    for actor in actors {
        if !config.in_default_batch(actor.kind) {
            continue;
        }
        for (key, pool) in actor.derive_pools(config).iter() {
            if pool.cadence == Cadence::Commit || pool.is_full() {
                continue;
            }
            status
                .by_cadence
                .entry(pool.cadence)
                .or_default()
                .push(PendingPool {
                    actor_id: actor.id.clone(),
                    actor_name: actor.name.clone(),
                    key: key.clone(),
                    value: pool.value,
                    max: pool.max,
                });
        }
    }

    status
}
