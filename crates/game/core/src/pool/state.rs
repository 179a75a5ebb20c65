//! Pool records: the derived view and the persisted snapshot.

use super::{Cadence, Commitment};
use crate::refresh::RefreshCadence;

/// Transient additive modifiers to a pool's max.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TempModifiers {
    /// Cleared only by hand.
    pub commit: i32,
    /// Cleared by scene and day refreshes.
    pub scene: i32,
    /// Cleared by day refreshes.
    pub day: i32,
}

impl TempModifiers {
    pub const fn sum(&self) -> i64 {
        self.commit as i64 + self.scene as i64 + self.day as i64
    }

    /// Modifiers left after a refresh at `cadence`.
    pub const fn after_refresh(&self, cadence: RefreshCadence) -> Self {
        match cadence {
            RefreshCadence::Scene => Self {
                commit: self.commit,
                scene: 0,
                day: self.day,
            },
            RefreshCadence::Day => Self {
                commit: self.commit,
                scene: 0,
                day: 0,
            },
        }
    }
}

/// Clamps a signed amount into the `u32` range.
pub(crate) fn clamp_u32(amount: i64) -> u32 {
    u32::try_from(amount.max(0)).unwrap_or(u32::MAX)
}

/// Max of a pool given its base capacity and temp modifiers, never negative.
pub fn max_with_temp(base_max: u32, temp: &TempModifiers) -> u32 {
    clamp_u32(i64::from(base_max) + temp.sum())
}

/// Derived pool as seen by the rest of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    pub value: u32,
    pub max: u32,
    /// Sum of granting formula outputs, before temp modifiers.
    pub base_max: u32,
    pub cadence: Cadence,
    pub temp: TempModifiers,
    /// Present only for owners that track commitments.
    pub committed: Option<u32>,
    pub commitments: Option<Vec<Commitment>>,
}

impl Pool {
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }

    /// Committed amount, zero for owners that do not track commitments.
    pub fn committed_amount(&self) -> u32 {
        self.committed.unwrap_or(0)
    }

    pub fn has_commitments(&self) -> bool {
        self.commitments.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn persisted(&self) -> PersistedPool {
        PersistedPool {
            value: Some(self.value),
            max: self.max,
            cadence: self.cadence,
            temp: self.temp,
        }
    }
}

/// Pool state stored on the actor record between derivations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PersistedPool {
    /// Current value including temp modifiers. `None` until first written.
    pub value: Option<u32>,
    pub max: u32,
    pub cadence: Cadence,
    pub temp: TempModifiers,
}
