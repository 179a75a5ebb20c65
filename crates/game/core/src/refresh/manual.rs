//! Manual pool operations outside the scene/day ladder.

use super::{ActorUpdate, PoolRefresh, RefreshError, ReleasedEffort};
use crate::actor::ActorRecord;
use crate::config::EngineConfig;
use crate::item::ItemId;
use crate::pool::state::{clamp_u32, max_with_temp};
use crate::pool::{Pool, PoolKey, TempModifiers, total_committed};

/// Result of refilling named pools.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualRefresh {
    pub update: ActorUpdate,
    pub pools: Vec<PoolRefresh>,
    /// Requested keys the actor has no pool for.
    pub unknown: Vec<PoolKey>,
}

/// Result of releasing one power's commitment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitmentRelease {
    pub update: ActorUpdate,
    pub released: Vec<ReleasedEffort>,
}

/// Operator override of one pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolOverride {
    /// New value, clamped to `[0, max]` after any temp change.
    pub value: Option<i64>,
    /// Replacement temp modifiers. Without an explicit value the current
    /// value shifts by the change in the temp sum.
    pub temp: Option<TempModifiers>,
}

impl PoolOverride {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.temp.is_none()
    }
}

/// Result of overriding one pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolOverrideResult {
    pub update: ActorUpdate,
    /// The pool as it reads after the update is applied.
    pub pool: Pool,
}

/// Refills the named pools to max regardless of cadence.
///
/// Committed effort stays committed: for owners that track commitments the
/// value is `max - committed`. Unknown keys are reported, not rejected.
pub fn refresh_specific_pools(
    actor: &ActorRecord,
    keys: &[PoolKey],
    config: &EngineConfig,
) -> ManualRefresh {
    let mut result = ManualRefresh::default();
    let mut pools = actor.derive_pools(config);

    for key in keys {
        let Some(pool) = pools.get_mut(key) else {
            tracing::warn!("Pool {} not found on {}", key, actor.id);
            if !result.unknown.contains(key) {
                result.unknown.push(key.clone());
            }
            continue;
        };

        let old_value = pool.value;
        pool.value = pool.max.saturating_sub(pool.committed_amount());

        let persisted = pool.persisted();
        if actor.pools.get(key) != Some(&persisted) {
            result.update.pools.insert(key.clone(), persisted);
        }
        if pool.value != old_value {
            result.pools.push(PoolRefresh {
                key: key.clone(),
                old_value,
                new_value: pool.value,
                max: pool.max,
                cadence: pool.cadence,
                temp_reset: false,
            });
        }
    }

    result
}

/// Releases the first commitment `power_id` holds on `key`.
///
/// A power that committed more than once keeps its later commitments. The
/// released amount returns to the pool, capped at max.
pub fn release_commitment(
    actor: &ActorRecord,
    key: &PoolKey,
    power_id: &ItemId,
    config: &EngineConfig,
) -> Result<CommitmentRelease, RefreshError> {
    let mut pools = actor.derive_pools(config);
    let pool = pools
        .get_mut(key)
        .ok_or_else(|| RefreshError::UnknownPool(key.clone()))?;

    let no_commitment = || RefreshError::NoCommitment {
        key: key.clone(),
        power_id: power_id.clone(),
    };

    if !actor.tracks_commitments(config) {
        return Err(no_commitment());
    }

    let mut retained = actor
        .effort_commitments
        .get(key)
        .cloned()
        .unwrap_or_default();
    let index = retained
        .iter()
        .position(|c| &c.power_id == power_id)
        .ok_or_else(no_commitment)?;
    let released = retained.remove(index);

    pool.value = pool.value.saturating_add(released.amount).min(pool.max);
    pool.committed = Some(total_committed(&retained));

    let mut update = ActorUpdate::default();
    update.pools.insert(key.clone(), pool.persisted());
    update.commitments.insert(key.clone(), retained);

    tracing::debug!(
        "Released {} effort on {} for {}",
        released.amount,
        key,
        actor.id
    );

    Ok(CommitmentRelease {
        update,
        released: vec![ReleasedEffort {
            key: key.clone(),
            power_id: released.power_id,
            power_name: released.power_name,
            amount: released.amount,
        }],
    })
}

/// Sets a pool's value and temp modifiers by hand.
///
/// This is the only way `temp.commit` changes once written.
pub fn override_pool(
    actor: &ActorRecord,
    key: &PoolKey,
    change: &PoolOverride,
    config: &EngineConfig,
) -> Result<PoolOverrideResult, RefreshError> {
    let mut pools = actor.derive_pools(config);
    let pool = pools
        .get_mut(key)
        .ok_or_else(|| RefreshError::UnknownPool(key.clone()))?;
    let old_value = pool.value;

    if let Some(temp) = change.temp {
        let delta = temp.sum() - pool.temp.sum();
        pool.temp = temp;
        pool.max = max_with_temp(pool.base_max, &temp);
        pool.value = clamp_u32(i64::from(pool.value) + delta).min(pool.max);
    }
    if let Some(value) = change.value {
        pool.value = clamp_u32(value).min(pool.max);
    }

    let mut update = ActorUpdate::default();
    let persisted = pool.persisted();
    if actor.pools.get(key) != Some(&persisted) {
        update.pools.insert(key.clone(), persisted);
    }

    tracing::debug!(
        "Override {} on {}: {} -> {}/{}",
        key,
        actor.id,
        old_value,
        pool.value,
        pool.max
    );

    Ok(PoolOverrideResult {
        update,
        pool: pool.clone(),
    })
}
