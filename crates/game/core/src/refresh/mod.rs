//! Scene and day refresh.
//!
//! A refresh is planned, not performed: [`plan_refresh`] reads an actor
//! record and returns the complete batch of field changes ([`ActorUpdate`])
//! together with a [`RefreshSummary`]. The caller commits the batch in one
//! write or not at all.
//!
//! # Pass order
//!
//! 1. health and strain (day only)
//! 2. commitment release
//! 3. pool refill by cadence
//! 4. temp modifier reset
//! 5. consumption use refill
//! 6. unprepare powers (day only)

mod manual;
mod plan;
mod status;
mod summary;
mod update;

use core::str::FromStr;

pub use manual::{
    CommitmentRelease, ManualRefresh, PoolOverride, PoolOverrideResult, override_pool,
    refresh_specific_pools, release_commitment,
};
pub use plan::{RefreshPlan, plan_refresh};
pub use status::{PendingPool, RefreshStatus, refresh_status};
pub use summary::{
    ConsumptionRefresh, MeterChange, PoolRefresh, RefreshSummary, ReleasedEffort, UnpreparedPower,
};
pub use update::{ActorUpdate, ItemChange};

use crate::error::{EngineError, ErrorSeverity};
use crate::item::ItemId;
use crate::pool::PoolKey;

/// Cadence a refresh is requested at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum RefreshCadence {
    Scene,
    Day,
}

impl RefreshCadence {
    pub const fn rank(self) -> u8 {
        match self {
            Self::Scene => 1,
            Self::Day => 2,
        }
    }
}

impl FromStr for RefreshCadence {
    type Err = RefreshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scene" => Ok(Self::Scene),
            "day" => Ok(Self::Day),
            _ => Err(RefreshError::InvalidCadence(s.to_string())),
        }
    }
}

/// Caller-supplied switches for one refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RefreshOptions {
    /// Frail rest: a day refresh restores no hit points.
    pub frail: bool,
    /// Plan and report, but do not commit.
    pub dry_run: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error("invalid refresh cadence '{0}', expected 'scene' or 'day'")]
    InvalidCadence(String),

    #[error("actor has no pool {0}")]
    UnknownPool(PoolKey),

    #[error("no commitment by power {power_id} on pool {key}")]
    NoCommitment { key: PoolKey, power_id: ItemId },

    #[error("update references missing item {0}")]
    MissingItem(ItemId),

    #[error("update references missing uses counter {slot} on item {item_id}")]
    MissingUses { item_id: ItemId, slot: usize },
}

impl EngineError for RefreshError {
    fn severity(&self) -> ErrorSeverity {
        use RefreshError::*;
        match self {
            InvalidCadence(_) | UnknownPool(_) | NoCommitment { .. } => ErrorSeverity::Validation,
            MissingItem(_) | MissingUses { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use RefreshError::*;
        match self {
            InvalidCadence(_) => "REFRESH_INVALID_CADENCE",
            UnknownPool(_) => "REFRESH_UNKNOWN_POOL",
            NoCommitment { .. } => "REFRESH_NO_COMMITMENT",
            MissingItem(_) => "REFRESH_MISSING_ITEM",
            MissingUses { .. } => "REFRESH_MISSING_USES",
        }
    }
}
