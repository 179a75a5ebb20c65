//! Repository layer for actor records.
//!
//! Repositories are the record store behind the runtime: they load actors,
//! list them, and commit refreshed records with a compare-and-swap on the
//! record revision so a batch of changes lands whole or not at all.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileActorRepository;
pub use memory::InMemoryActorRepo;
pub use traits::ActorRepository;
