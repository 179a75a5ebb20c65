//! In-memory ActorRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use swnr_core::{ActorId, ActorRecord};

use super::{ActorRepository, RepositoryError, Result};

/// In-memory implementation of ActorRepository.
pub struct InMemoryActorRepo {
    actors: RwLock<BTreeMap<ActorId, ActorRecord>>,
}

impl InMemoryActorRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            actors: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a repository holding `records`.
    pub fn with_actors(records: impl IntoIterator<Item = ActorRecord>) -> Self {
        Self {
            actors: RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.id.clone(), record))
                    .collect(),
            ),
        }
    }
}

impl Default for InMemoryActorRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorRepository for InMemoryActorRepo {
    fn load(&self, id: &ActorId) -> Result<Option<ActorRecord>> {
        let actors = self
            .actors
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(actors.get(id).cloned())
    }

    fn list_ids(&self) -> Result<Vec<ActorId>> {
        let actors = self
            .actors
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(actors.keys().cloned().collect())
    }

    fn save(&self, record: &ActorRecord) -> Result<()> {
        let mut actors = self
            .actors
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        actors.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn commit(&self, expected_revision: u64, record: &ActorRecord) -> Result<u64> {
        let mut actors = self
            .actors
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let stored = actors
            .get_mut(&record.id)
            .ok_or_else(|| RepositoryError::NotFound(record.id.clone()))?;

        if stored.revision != expected_revision {
            return Err(RepositoryError::RevisionConflict {
                id: record.id.clone(),
                expected: expected_revision,
                found: stored.revision,
            });
        }

        let revision = expected_revision + 1;
        *stored = ActorRecord {
            revision,
            ..record.clone()
        };
        Ok(revision)
    }

    fn delete(&self, id: &ActorId) -> Result<()> {
        let mut actors = self
            .actors
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        actors.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swnr_core::ActorKind;

    #[test]
    fn commit_checks_revision() {
        let repo = InMemoryActorRepo::with_actors([ActorRecord::new("a", "A", ActorKind::Npc)]);
        let mut record = repo.load(&"a".into()).unwrap().unwrap();
        record.level = 2;

        assert_eq!(repo.commit(0, &record).unwrap(), 1);
        assert!(matches!(
            repo.commit(0, &record),
            Err(RepositoryError::RevisionConflict {
                expected: 0,
                found: 1,
                ..
            })
        ));
        let stored = repo.load(&"a".into()).unwrap().unwrap();
        assert_eq!((stored.level, stored.revision), (2, 1));
    }

    #[test]
    fn commit_to_missing_actor_fails() {
        let repo = InMemoryActorRepo::new();
        let record = ActorRecord::new("ghost", "Ghost", ActorKind::Npc);
        assert!(matches!(
            repo.commit(0, &record),
            Err(RepositoryError::NotFound(_))
        ));
    }
}
