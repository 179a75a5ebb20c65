//! Runtime orchestration for the SWN resource pool engine.
//!
//! This crate wires the pure refresh planner of `swnr-core` to an actor
//! repository, a single refresh worker and an event bus. Consumers embed
//! [`Runtime`] and talk to it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for refresh notifications
//! - [`repository`] stores actor records with compare-and-swap commits
//! - [`report`] aggregates batch refresh results
//! - workers stay internal to the crate
pub mod api;
pub mod events;
pub mod report;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{CommitmentEvent, Event, EventBus, RefreshEvent, Topic};
pub use report::{ActorFailure, BatchReport};
pub use repository::{
    ActorRepository, FileActorRepository, InMemoryActorRepo, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
