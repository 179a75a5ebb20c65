//! Repository contract for loading and committing actor records.

use swnr_core::{ActorId, ActorRecord};

use super::Result;

/// Store of actor records.
///
/// `commit` is the only way a refresh writes: it replaces the stored record
/// if and only if the stored revision still equals `expected_revision`, and
/// bumps the revision on success.
pub trait ActorRepository: Send + Sync {
    /// Load an actor by id.
    fn load(&self, id: &ActorId) -> Result<Option<ActorRecord>>;

    /// List all stored actor ids in ascending order.
    fn list_ids(&self) -> Result<Vec<ActorId>>;

    /// Store a record as given, replacing any existing one.
    fn save(&self, record: &ActorRecord) -> Result<()>;

    /// Replace a record atomically. Returns the new revision.
    fn commit(&self, expected_revision: u64, record: &ActorRecord) -> Result<u64>;

    /// Delete an actor. Deleting a missing actor is not an error.
    fn delete(&self, id: &ActorId) -> Result<()>;

    /// Check if an actor exists.
    fn exists(&self, id: &ActorId) -> bool {
        matches!(self.load(id), Ok(Some(_)))
    }
}
