//! Pool derivation from feature grants.
//!
//! Pools are never created directly. Every derivation walks the owner's
//! features, sums grant contributions per key, and reconciles the result with
//! the persisted snapshot:
//!
//! 1. skip grants whose condition is false
//! 2. evaluate the formula (failures contribute 0)
//! 3. sum contributions per key, keeping the first grant's cadence
//! 4. seed `value` from the persisted value, the open commitments, or full
//!
//! Derivation is pure. Callers persist whatever they want to keep.

use std::collections::BTreeMap;

use super::commitment::total_committed;
use super::state::{clamp_u32, max_with_temp};
use super::{Cadence, Commitment, PersistedPool, Pool, PoolKey};
use crate::expr::ExprError;
use crate::item::{Item, ItemData};

/// Evaluators injected into derivation.
pub trait PoolEvaluator {
    /// Returns false for conditions that fail to evaluate.
    fn evaluate_condition(&self, condition: &str) -> bool;

    /// Evaluates a capacity formula to a non-negative whole number.
    fn evaluate_formula(&self, formula: &str) -> Result<f64, ExprError>;
}

/// Pools derived for one owner, keyed by pool key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedPools(BTreeMap<PoolKey, Pool>);

impl DerivedPools {
    pub fn get(&self, key: &PoolKey) -> Option<&Pool> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &PoolKey) -> Option<&mut Pool> {
        self.0.get_mut(key)
    }

    pub fn contains(&self, key: &PoolKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PoolKey, &Pool)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&PoolKey, &mut Pool)> {
        self.0.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PoolKey> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Snapshot suitable for storing on the actor record.
    pub fn persisted(&self) -> BTreeMap<PoolKey, PersistedPool> {
        self.0
            .iter()
            .map(|(key, pool)| (key.clone(), pool.persisted()))
            .collect()
    }

    pub fn into_inner(self) -> BTreeMap<PoolKey, Pool> {
        self.0
    }
}

impl FromIterator<(PoolKey, Pool)> for DerivedPools {
    fn from_iter<T: IntoIterator<Item = (PoolKey, Pool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Derives the owner's pools from its feature items.
///
/// `commitments` is `Some` for owners that track effort commitments; those
/// pools carry `committed` and `commitments`, and unseeded values start net
/// of committed effort.
pub fn calculate_pools_from_features<'a, I>(
    items: I,
    persisted: &BTreeMap<PoolKey, PersistedPool>,
    commitments: Option<&BTreeMap<PoolKey, Vec<Commitment>>>,
    evaluator: &dyn PoolEvaluator,
) -> DerivedPools
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut bases: BTreeMap<PoolKey, (u32, Cadence)> = BTreeMap::new();

    for item in items {
        let ItemData::Feature(feature) = &item.data else {
            continue;
        };

        for grant in &feature.pools_granted {
            let key = grant.key();

            if let Some(condition) = grant.condition_text()
                && !evaluator.evaluate_condition(condition)
            {
                tracing::debug!("Grant {} from {} skipped by condition", key, item.name);
                continue;
            }

            let contribution = match grant.formula_text() {
                Some(formula) => match evaluator.evaluate_formula(formula) {
                    Ok(value) => clamp_u32(value as i64),
                    Err(err) => {
                        tracing::warn!(
                            "Failed to evaluate formula {:?} for {}: {}",
                            formula,
                            item.name,
                            err
                        );
                        0
                    }
                },
                None => {
                    tracing::warn!("No formula provided for pool {} in {}", key, item.name);
                    0
                }
            };

            bases
                .entry(key)
                .and_modify(|(base, _)| *base = base.saturating_add(contribution))
                .or_insert((contribution, grant.cadence));
        }
    }

    bases
        .into_iter()
        .map(|(key, (base_max, cadence))| {
            let stored = persisted.get(&key);
            let open = commitments.map(|all| all.get(&key).cloned().unwrap_or_default());
            let pool = seed_pool(base_max, cadence, stored, open);
            (key, pool)
        })
        .collect()
}

fn seed_pool(
    base_max: u32,
    cadence: Cadence,
    stored: Option<&PersistedPool>,
    commitments: Option<Vec<Commitment>>,
) -> Pool {
    let temp = stored.map(|p| p.temp).unwrap_or_default();
    let temp_sum = temp.sum();
    let max = max_with_temp(base_max, &temp);
    let committed = commitments.as_deref().map(total_committed);

    let value = match (stored.and_then(|p| p.value), committed) {
        // Stored values include temp modifiers; strip the current temps,
        // clamp into the base, then put them back.
        (Some(stored_value), _) => {
            let inferred = (i64::from(stored_value) - temp_sum).clamp(0, i64::from(base_max));
            clamp_u32(inferred + temp_sum).min(max)
        }
        (None, Some(committed)) => {
            let available = (i64::from(base_max) - i64::from(committed)).max(0);
            clamp_u32(available + temp_sum).min(max)
        }
        (None, None) => max,
    };

    Pool {
        value,
        max,
        base_max,
        cadence,
        temp,
        committed,
        commitments,
    }
}
