use super::CommitDuration;
use crate::item::ItemId;
use crate::refresh::RefreshCadence;

/// Effort reserved from a pool by a power in use.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commitment {
    pub power_id: ItemId,
    pub power_name: String,
    pub amount: u32,
    pub duration: CommitDuration,
}

impl Commitment {
    pub fn new(
        power_id: impl Into<ItemId>,
        power_name: impl Into<String>,
        amount: u32,
        duration: CommitDuration,
    ) -> Self {
        Self {
            power_id: power_id.into(),
            power_name: power_name.into(),
            amount,
            duration,
        }
    }
}

/// Sum of commitment amounts.
pub fn total_committed(commitments: &[Commitment]) -> u32 {
    commitments
        .iter()
        .fold(0u32, |sum, c| sum.saturating_add(c.amount))
}

/// Splits commitments into `(released, retained)` for a refresh at `cadence`.
pub fn partition_released(
    commitments: &[Commitment],
    cadence: RefreshCadence,
) -> (Vec<Commitment>, Vec<Commitment>) {
    commitments
        .iter()
        .cloned()
        .partition(|c| c.duration.released_by(cadence))
}
