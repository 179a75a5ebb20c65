use core::fmt;
use std::collections::BTreeMap;

use super::RefreshError;
use crate::actor::ActorRecord;
use crate::item::{ConsumptionKind, ItemId};
use crate::pool::{Commitment, PersistedPool, PoolKey};

/// Changes to one item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemChange {
    pub item_id: ItemId,
    pub prepared: Option<bool>,
    /// `(slot, new value)` for `Uses` consumptions.
    pub uses: Vec<(usize, u32)>,
}

impl ItemChange {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            prepared: None,
            uses: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prepared.is_none() && self.uses.is_empty()
    }

    pub(crate) fn sets_uses(&self, slot: usize) -> bool {
        self.uses.iter().any(|(s, _)| *s == slot)
    }
}

/// One atomic batch of field changes for an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorUpdate {
    pub health: Option<u32>,
    pub system_strain: Option<u32>,
    /// Pool snapshots to overwrite.
    pub pools: BTreeMap<PoolKey, PersistedPool>,
    /// Commitment lists to replace. An empty list removes the key.
    pub commitments: BTreeMap<PoolKey, Vec<Commitment>>,
    pub items: Vec<ItemChange>,
}

impl ActorUpdate {
    pub fn is_empty(&self) -> bool {
        self.health.is_none()
            && self.system_strain.is_none()
            && self.pools.is_empty()
            && self.commitments.is_empty()
            && self.items.is_empty()
    }

    /// Applies every change, or none of them if any item reference is stale.
    pub fn apply(&self, actor: &mut ActorRecord) -> Result<(), RefreshError> {
        self.check_items(actor)?;

        if let Some(health) = self.health {
            actor.health.value = health;
        }
        if let Some(strain) = self.system_strain {
            actor.system_strain.value = strain;
        }

        for (key, pool) in &self.pools {
            actor.pools.insert(key.clone(), *pool);
        }

        for (key, commitments) in &self.commitments {
            if commitments.is_empty() {
                actor.effort_commitments.remove(key);
            } else {
                actor
                    .effort_commitments
                    .insert(key.clone(), commitments.clone());
            }
        }

        for change in &self.items {
            let Some(power) = actor
                .item_mut(&change.item_id)
                .and_then(|item| item.as_power_mut())
            else {
                continue;
            };
            if let Some(prepared) = change.prepared {
                power.prepared = prepared;
            }
            for &(slot, new_value) in &change.uses {
                if let Some(ConsumptionKind::Uses { value, max }) =
                    power.consumptions.get_mut(slot).map(|c| &mut c.kind)
                {
                    *value = new_value.min(*max);
                }
            }
        }

        Ok(())
    }

    fn check_items(&self, actor: &ActorRecord) -> Result<(), RefreshError> {
        for change in &self.items {
            let power = actor
                .item(&change.item_id)
                .and_then(|item| item.as_power())
                .ok_or_else(|| RefreshError::MissingItem(change.item_id.clone()))?;

            for &(slot, _) in &change.uses {
                let has_uses = power
                    .consumptions
                    .get(slot)
                    .is_some_and(|c| c.uses_counter().is_some());
                if !has_uses {
                    return Err(RefreshError::MissingUses {
                        item_id: change.item_id.clone(),
                        slot,
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ActorUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pool(s), {} commitment key(s), {} item(s)",
            self.pools.len(),
            self.commitments.len(),
            self.items.len()
        )
    }
}
