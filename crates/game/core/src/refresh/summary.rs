use super::RefreshCadence;
use crate::actor::{ActorId, ActorRecord};
use crate::item::ItemId;
use crate::pool::{Cadence, PoolKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeterChange {
    pub before: u32,
    pub after: u32,
}

/// A pool whose value changed or whose temp modifiers were reset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolRefresh {
    pub key: PoolKey,
    pub old_value: u32,
    pub new_value: u32,
    pub max: u32,
    pub cadence: Cadence,
    pub temp_reset: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleasedEffort {
    pub key: PoolKey,
    pub power_id: ItemId,
    pub power_name: String,
    pub amount: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumptionRefresh {
    pub item_id: ItemId,
    pub item_name: String,
    /// Index into the power's consumption list.
    pub slot: usize,
    pub old_value: u32,
    pub new_value: u32,
    pub cadence: Cadence,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnpreparedPower {
    pub item_id: ItemId,
    pub item_name: String,
    pub had_resource_cost: bool,
}

/// Report of one actor refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefreshSummary {
    pub actor_id: ActorId,
    pub actor_name: String,
    pub cadence: RefreshCadence,
    pub health: Option<MeterChange>,
    pub system_strain: Option<MeterChange>,
    pub pools: Vec<PoolRefresh>,
    pub effort_released: Vec<ReleasedEffort>,
    pub consumption_refreshes: Vec<ConsumptionRefresh>,
    pub unprepared_powers: Vec<UnpreparedPower>,
}

impl RefreshSummary {
    pub fn new(actor: &ActorRecord, cadence: RefreshCadence) -> Self {
        Self {
            actor_id: actor.id.clone(),
            actor_name: actor.name.clone(),
            cadence,
            health: None,
            system_strain: None,
            pools: Vec::new(),
            effort_released: Vec::new(),
            consumption_refreshes: Vec::new(),
            unprepared_powers: Vec::new(),
        }
    }

    pub fn pools_refreshed(&self) -> usize {
        self.pools.len()
    }

    pub fn consumption_uses_refreshed(&self) -> usize {
        self.consumption_refreshes.len()
    }

    pub fn prepared_powers_unprepared(&self) -> usize {
        self.unprepared_powers.len()
    }

    pub fn effort_released_total(&self) -> u32 {
        self.effort_released
            .iter()
            .fold(0u32, |sum, e| sum.saturating_add(e.amount))
    }

    /// One-line description for logs and CLI output.
    pub fn headline(&self) -> String {
        format!(
            "{} ({}): {} pools refreshed, {} commitments released, {} uses refilled, {} powers unprepared",
            self.actor_name,
            self.cadence,
            self.pools_refreshed(),
            self.effort_released.len(),
            self.consumption_uses_refreshed(),
            self.prepared_powers_unprepared()
        )
    }
}
