//! Aggregated results of a batch refresh.

use serde::{Deserialize, Serialize};
use swnr_core::{ActorId, RefreshCadence, RefreshSummary};

/// An actor that could not be refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorFailure {
    pub actor_id: ActorId,
    pub error: String,
}

/// Result of refreshing many actors: one summary per success, one failure
/// per actor that errored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub cadence: RefreshCadence,
    pub refreshed: Vec<RefreshSummary>,
    pub failures: Vec<ActorFailure>,
}

impl BatchReport {
    pub fn new(cadence: RefreshCadence) -> Self {
        Self {
            cadence,
            refreshed: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn actors_refreshed(&self) -> usize {
        self.refreshed.len()
    }

    pub fn pools_refreshed(&self) -> usize {
        self.refreshed.iter().map(RefreshSummary::pools_refreshed).sum()
    }

    pub fn effort_released(&self) -> u32 {
        self.refreshed
            .iter()
            .fold(0u32, |sum, s| sum.saturating_add(s.effort_released_total()))
    }

    pub fn consumption_uses_refreshed(&self) -> usize {
        self.refreshed
            .iter()
            .map(RefreshSummary::consumption_uses_refreshed)
            .sum()
    }

    pub fn prepared_powers_unprepared(&self) -> usize {
        self.refreshed
            .iter()
            .map(RefreshSummary::prepared_powers_unprepared)
            .sum()
    }
}
