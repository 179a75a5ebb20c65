//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! refreshing actors, inspecting pools, or streaming events from specific
//! topics.

use tokio::sync::{broadcast, mpsc, oneshot};

use swnr_core::refresh::{ManualRefresh, RefreshStatus};
use swnr_core::{
    ActorId, ActorRecord, DerivedPools, DerivedSheet, ItemId, Pool, PoolKey, PoolOverride,
    RefreshCadence, RefreshOptions, RefreshSummary, ReleasedEffort,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::report::BatchReport;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<Result<T>>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Refresh one actor at `cadence` and commit the result.
    pub async fn refresh_actor(
        &self,
        id: impl Into<ActorId>,
        cadence: RefreshCadence,
        options: RefreshOptions,
    ) -> Result<RefreshSummary> {
        let id = id.into();
        self.request(|reply| Command::RefreshActor {
            id,
            cadence,
            options,
            reply,
        })
        .await
    }

    /// Refresh one actor at a cadence given as text.
    ///
    /// An unknown cadence fails before any command is queued.
    pub async fn refresh_actor_named(
        &self,
        id: impl Into<ActorId>,
        cadence: &str,
        options: RefreshOptions,
    ) -> Result<RefreshSummary> {
        let cadence: RefreshCadence = cadence.parse()?;
        self.refresh_actor(id, cadence, options).await
    }

    /// Refresh `ids`, or every non-excluded actor when `ids` is `None`.
    ///
    /// Per-actor failures are reported in the [`BatchReport`]; only a failure
    /// to enumerate the store is returned as an error.
    pub async fn refresh_many(
        &self,
        ids: Option<Vec<ActorId>>,
        cadence: RefreshCadence,
        options: RefreshOptions,
    ) -> Result<BatchReport> {
        self.request(|reply| Command::RefreshMany {
            ids,
            cadence,
            options,
            reply,
        })
        .await
    }

    /// Refill the named pools to max regardless of cadence.
    pub async fn refill_pools(
        &self,
        id: impl Into<ActorId>,
        keys: Vec<PoolKey>,
    ) -> Result<ManualRefresh> {
        let id = id.into();
        self.request(|reply| Command::RefillPools { id, keys, reply })
            .await
    }

    /// Release the first commitment `power_id` holds on `key`.
    pub async fn release_commitment(
        &self,
        id: impl Into<ActorId>,
        key: PoolKey,
        power_id: impl Into<ItemId>,
    ) -> Result<Vec<ReleasedEffort>> {
        let id = id.into();
        let power_id = power_id.into();
        self.request(|reply| Command::ReleaseCommitment {
            id,
            key,
            power_id,
            reply,
        })
        .await
    }

    /// Set a pool's value and temp modifiers by hand. Returns the pool as
    /// stored afterwards.
    pub async fn override_pool(
        &self,
        id: impl Into<ActorId>,
        key: PoolKey,
        change: PoolOverride,
    ) -> Result<Pool> {
        let id = id.into();
        self.request(|reply| Command::OverridePool {
            id,
            key,
            change,
            reply,
        })
        .await
    }

    /// Current derived pools of an actor.
    pub async fn derive_pools(&self, id: impl Into<ActorId>) -> Result<DerivedPools> {
        let id = id.into();
        self.request(|reply| Command::DerivePools { id, reply })
            .await
    }

    /// Derived stats, saves and pools of an actor.
    pub async fn derive_sheet(&self, id: impl Into<ActorId>) -> Result<DerivedSheet> {
        let id = id.into();
        self.request(|reply| Command::DeriveSheet { id, reply })
            .await
    }

    pub async fn actor(&self, id: impl Into<ActorId>) -> Result<ActorRecord> {
        let id = id.into();
        self.request(|reply| Command::LoadActor { id, reply }).await
    }

    /// Validate and store a record, replacing any actor with the same id.
    pub async fn save_actor(&self, record: ActorRecord) -> Result<()> {
        self.request(|reply| Command::SaveActor {
            record: Box::new(record),
            reply,
        })
        .await
    }

    pub async fn list_actors(&self) -> Result<Vec<ActorId>> {
        self.request(|reply| Command::ListActors { reply }).await
    }

    /// Pools below max across the default actor set, grouped by cadence.
    pub async fn refresh_status(&self) -> Result<RefreshStatus> {
        self.request(|reply| Command::Status { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Refresh` - Actor refreshes, failures and batch completion
    /// - `Topic::Commitment` - Manual commitment releases
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
