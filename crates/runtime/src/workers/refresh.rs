//! Refresh worker that owns access to the actor repository.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), plans
//! refreshes with `swnr-core`, commits the resulting updates and publishes
//! events to the EventBus. Commands are handled one at a time, so two
//! refreshes of the same actor can never interleave.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use swnr_core::refresh::{
    ActorUpdate, ManualRefresh, PoolOverride, RefreshStatus, override_pool,
    refresh_specific_pools, refresh_status, release_commitment,
};
use swnr_core::{
    ActorId, ActorRecord, DerivedPools, DerivedSheet, EngineConfig, ItemId, Pool, PoolKey,
    RefreshCadence, RefreshOptions, RefreshSummary, ReleasedEffort, plan_refresh,
};

use crate::api::{Result, RuntimeError};
use crate::events::{CommitmentEvent, Event, EventBus, RefreshEvent};
use crate::report::{ActorFailure, BatchReport};
use crate::repository::ActorRepository;

/// Commands that can be sent to the refresh worker
pub enum Command {
    /// Refresh one actor.
    RefreshActor {
        id: ActorId,
        cadence: RefreshCadence,
        options: RefreshOptions,
        reply: oneshot::Sender<Result<RefreshSummary>>,
    },
    /// Refresh a set of actors, or the default set when `ids` is `None`.
    RefreshMany {
        ids: Option<Vec<ActorId>>,
        cadence: RefreshCadence,
        options: RefreshOptions,
        reply: oneshot::Sender<Result<BatchReport>>,
    },
    /// Refill named pools regardless of cadence.
    RefillPools {
        id: ActorId,
        keys: Vec<PoolKey>,
        reply: oneshot::Sender<Result<ManualRefresh>>,
    },
    /// Release one power's commitments on a pool.
    ReleaseCommitment {
        id: ActorId,
        key: PoolKey,
        power_id: ItemId,
        reply: oneshot::Sender<Result<Vec<ReleasedEffort>>>,
    },
    /// Set a pool's value and temp modifiers by hand.
    OverridePool {
        id: ActorId,
        key: PoolKey,
        change: PoolOverride,
        reply: oneshot::Sender<Result<Pool>>,
    },
    DerivePools {
        id: ActorId,
        reply: oneshot::Sender<Result<DerivedPools>>,
    },
    DeriveSheet {
        id: ActorId,
        reply: oneshot::Sender<Result<DerivedSheet>>,
    },
    LoadActor {
        id: ActorId,
        reply: oneshot::Sender<Result<ActorRecord>>,
    },
    /// Validate and store a record as given.
    SaveActor {
        record: Box<ActorRecord>,
        reply: oneshot::Sender<Result<()>>,
    },
    ListActors {
        reply: oneshot::Sender<Result<Vec<ActorId>>>,
    },
    /// Pools below max across the default set.
    Status {
        reply: oneshot::Sender<Result<RefreshStatus>>,
    },
}

/// Background task that processes refresh commands.
pub struct RefreshWorker {
    repository: Arc<dyn ActorRepository>,
    config: EngineConfig,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl RefreshWorker {
    /// Creates a new refresh worker.
    pub fn new(
        repository: Arc<dyn ActorRepository>,
        config: EngineConfig,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            repository,
            config,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!("RefreshWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::RefreshActor {
                id,
                cadence,
                options,
                reply,
            } => {
                let result = self.refresh_actor(&id, cadence, options);
                if reply.send(result).is_err() {
                    debug!("RefreshActor reply channel closed (caller dropped)");
                }
            }
            Command::RefreshMany {
                ids,
                cadence,
                options,
                reply,
            } => {
                let result = self.refresh_many(ids, cadence, options);
                if reply.send(result).is_err() {
                    debug!("RefreshMany reply channel closed (caller dropped)");
                }
            }
            Command::RefillPools { id, keys, reply } => {
                let result = self.refill_pools(&id, &keys);
                if reply.send(result).is_err() {
                    debug!("RefillPools reply channel closed (caller dropped)");
                }
            }
            Command::ReleaseCommitment {
                id,
                key,
                power_id,
                reply,
            } => {
                let result = self.release_commitment(&id, &key, &power_id);
                if reply.send(result).is_err() {
                    debug!("ReleaseCommitment reply channel closed (caller dropped)");
                }
            }
            Command::OverridePool {
                id,
                key,
                change,
                reply,
            } => {
                let result = self.override_pool(&id, &key, &change);
                if reply.send(result).is_err() {
                    debug!("OverridePool reply channel closed (caller dropped)");
                }
            }
            Command::DerivePools { id, reply } => {
                let result = self
                    .load(&id)
                    .map(|actor| actor.derive_pools(&self.config));
                if reply.send(result).is_err() {
                    debug!("DerivePools reply channel closed (caller dropped)");
                }
            }
            Command::DeriveSheet { id, reply } => {
                let result = self.load(&id).map(|actor| actor.derive(&self.config));
                if reply.send(result).is_err() {
                    debug!("DeriveSheet reply channel closed (caller dropped)");
                }
            }
            Command::LoadActor { id, reply } => {
                if reply.send(self.load(&id)).is_err() {
                    debug!("LoadActor reply channel closed (caller dropped)");
                }
            }
            Command::SaveActor { record, reply } => {
                let result = self.save(&record);
                if reply.send(result).is_err() {
                    debug!("SaveActor reply channel closed (caller dropped)");
                }
            }
            Command::ListActors { reply } => {
                let result = self.repository.list_ids().map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!("ListActors reply channel closed (caller dropped)");
                }
            }
            Command::Status { reply } => {
                let result = self
                    .load_default_set()
                    .map(|actors| refresh_status(&actors, &self.config));
                if reply.send(result).is_err() {
                    debug!("Status reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn load(&self, id: &ActorId) -> Result<ActorRecord> {
        self.repository
            .load(id)?
            .ok_or_else(|| RuntimeError::ActorNotFound(id.clone()))
    }

    fn save(&self, record: &ActorRecord) -> Result<()> {
        record.validate()?;
        self.repository.save(record)?;
        info!("Stored actor {} ({})", record.id, record.kind);
        Ok(())
    }

    /// Applies `update` to a copy of `actor` and commits it against the
    /// revision the plan was computed from.
    fn commit(&self, actor: &ActorRecord, update: &ActorUpdate) -> Result<Option<u64>> {
        if update.is_empty() {
            return Ok(None);
        }
        let mut next = actor.clone();
        update.apply(&mut next)?;
        let revision = self.repository.commit(actor.revision, &next)?;
        Ok(Some(revision))
    }

    fn refresh_actor(
        &self,
        id: &ActorId,
        cadence: RefreshCadence,
        options: RefreshOptions,
    ) -> Result<RefreshSummary> {
        let actor = self.load(id)?;
        self.refresh_loaded(&actor, cadence, options)
    }

    fn refresh_loaded(
        &self,
        actor: &ActorRecord,
        cadence: RefreshCadence,
        options: RefreshOptions,
    ) -> Result<RefreshSummary> {
        let plan = plan_refresh(actor, cadence, options, &self.config);

        let revision = if options.dry_run {
            debug!("Dry run for {}, not committing {}", actor.id, plan.update);
            None
        } else {
            self.commit(actor, &plan.update)?
        };

        info!("Refreshed {}", plan.summary.headline());

        self.event_bus
            .publish(Event::Refresh(RefreshEvent::ActorRefreshed {
                summary: plan.summary.clone(),
                revision,
            }));

        Ok(plan.summary)
    }

    /// Loads every stored actor whose kind belongs to the default batch.
    /// Records that fail to load are logged and skipped.
    fn load_default_set(&self) -> Result<Vec<ActorRecord>> {
        let mut actors = Vec::new();
        for id in self.default_batch_ids()? {
            match self.load(&id) {
                Ok(actor) => actors.push(actor),
                Err(e) => warn!("Skipping {} in status: {}", id, e),
            }
        }
        Ok(actors)
    }

    /// Ids of stored actors whose kind belongs to the default batch.
    ///
    /// Records that fail to load here are kept so the refresh reports them.
    fn default_batch_ids(&self) -> Result<Vec<ActorId>> {
        let mut ids = Vec::new();
        for id in self.repository.list_ids()? {
            match self.repository.load(&id) {
                Ok(Some(actor)) if !self.config.in_default_batch(actor.kind) => {
                    debug!("Skipping {} ({}) in default batch", id, actor.kind)
                }
                Ok(None) => debug!("Actor {} vanished before loading", id),
                _ => ids.push(id),
            }
        }
        Ok(ids)
    }

    fn refresh_many(
        &self,
        ids: Option<Vec<ActorId>>,
        cadence: RefreshCadence,
        options: RefreshOptions,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::new(cadence);

        let ids = match ids {
            Some(ids) => {
                let mut seen = BTreeSet::new();
                ids.into_iter()
                    .filter(|id| seen.insert(id.clone()))
                    .collect()
            }
            None => self.default_batch_ids()?,
        };

        // Each actor is loaded right before its refresh so the plan always
        // starts from the latest committed revision.
        for id in ids {
            match self.refresh_actor(&id, cadence, options) {
                Ok(summary) => report.refreshed.push(summary),
                Err(e) => {
                    warn!("Failed to refresh {}: {}", id, e);
                    report.failures.push(ActorFailure {
                        actor_id: id,
                        error: e.to_string(),
                    });
                }
            }
        }

        for failure in &report.failures {
            self.event_bus
                .publish(Event::Refresh(RefreshEvent::ActorFailed {
                    actor_id: failure.actor_id.clone(),
                    cadence,
                    error: failure.error.clone(),
                }));
        }

        info!(
            "Batch {} refresh: {} actors, {} pools, {} effort released, {} failed",
            cadence,
            report.actors_refreshed(),
            report.pools_refreshed(),
            report.effort_released(),
            report.failures.len()
        );

        self.event_bus
            .publish(Event::Refresh(RefreshEvent::BatchCompleted {
                cadence,
                refreshed: report.actors_refreshed(),
                failed: report.failures.len(),
            }));

        Ok(report)
    }

    fn refill_pools(&self, id: &ActorId, keys: &[PoolKey]) -> Result<ManualRefresh> {
        let actor = self.load(id)?;
        let result = refresh_specific_pools(&actor, keys, &self.config);
        self.commit(&actor, &result.update)?;

        info!("Refilled {} pool(s) on {}", result.pools.len(), id);
        self.event_bus
            .publish(Event::Refresh(RefreshEvent::PoolsRefilled {
                actor_id: id.clone(),
                pools: result.pools.clone(),
            }));

        Ok(result)
    }

    fn override_pool(&self, id: &ActorId, key: &PoolKey, change: &PoolOverride) -> Result<Pool> {
        let actor = self.load(id)?;
        let result = override_pool(&actor, key, change, &self.config)?;
        self.commit(&actor, &result.update)?;

        info!(
            "Set {} on {} to {}/{}",
            key, id, result.pool.value, result.pool.max
        );
        self.event_bus
            .publish(Event::Refresh(RefreshEvent::PoolOverridden {
                actor_id: id.clone(),
                key: key.clone(),
                pool: result.pool.clone(),
            }));

        Ok(result.pool)
    }

    fn release_commitment(
        &self,
        id: &ActorId,
        key: &PoolKey,
        power_id: &ItemId,
    ) -> Result<Vec<ReleasedEffort>> {
        let actor = self.load(id)?;
        let result = release_commitment(&actor, key, power_id, &self.config)?;
        self.commit(&actor, &result.update)?;

        info!("Released commitment of {} on {} for {}", power_id, key, id);
        self.event_bus
            .publish(Event::Commitment(CommitmentEvent::Released {
                actor_id: id.clone(),
                released: result.released.clone(),
            }));

        Ok(result.released)
    }
}
