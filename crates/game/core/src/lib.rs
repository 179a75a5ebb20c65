//! Resource pool engine for the SWN ruleset.
//!
//! `swnr-core` owns the canonical rules for character resources: the actor and
//! item records, derived statistics, the formula language used by pool grants,
//! pool derivation from features, and the scene/day refresh planner. Every API
//! here is pure; persistence and scheduling live in `swnr-runtime`.
//!
//! Refreshing an actor is a two step affair: [`refresh::plan_refresh`] computes
//! an [`ActorUpdate`] plus a [`RefreshSummary`], and the caller commits the
//! update as one batch.
pub mod actor;
pub mod config;
pub mod error;
pub mod expr;
pub mod item;
pub mod pool;
pub mod refresh;
pub mod stats;

pub use actor::{ActorId, ActorKind, ActorRecord, ActorScope, DerivedSheet, ValidationError};
pub use config::EngineConfig;
pub use error::{EngineError, ErrorSeverity};
pub use expr::{AttributeSource, ExprError, ExprLimits, Expression, Value};
pub use item::{
    Consumption, ConsumptionKind, FeatureData, Item, ItemData, ItemId, PowerData, PowerPreset,
    PowerSubType, SkillData, SkillSource,
};
pub use pool::{
    Cadence, CommitDuration, Commitment, DerivedPools, PersistedPool, Pool, PoolEvaluator,
    PoolGrant, PoolKey, PoolKeyError, ResourceName, TempModifiers,
    calculate_pools_from_features,
};
pub use refresh::{
    ActorUpdate, CommitmentRelease, ConsumptionRefresh, ManualRefresh, MeterChange, PendingPool,
    PoolOverride, PoolRefresh, RefreshCadence, RefreshError, RefreshOptions, RefreshPlan,
    RefreshStatus, RefreshSummary, ReleasedEffort, UnpreparedPower, plan_refresh,
};
pub use stats::{Meter, Saves, StatBlock, StatKind, StatScore, StatValues, SystemStrain};
