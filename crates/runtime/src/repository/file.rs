//! File-based ActorRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use swnr_core::{ActorId, ActorRecord};

use super::{ActorRepository, RepositoryError, Result};

/// File-based implementation of ActorRepository.
///
/// # File Format
///
/// Actors are stored as `actor_{id}.bin` in bincode format. Writes go to a
/// temp file first and are moved into place with a rename, so readers see
/// either the old record or the new one.
pub struct FileActorRepository {
    base_dir: PathBuf,
    /// Serializes read-check-write in `commit` within this process.
    write_lock: Mutex<()>,
}

impl FileActorRepository {
    /// Create a new file-based actor repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to an actor file.
    fn actor_path(&self, id: &ActorId) -> Result<PathBuf> {
        if !id.is_valid() {
            return Err(RepositoryError::InvalidId(id.clone()));
        }
        Ok(self.base_dir.join(format!("actor_{}.bin", id)))
    }

    fn read(&self, path: &Path) -> Result<Option<ActorRecord>> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path).map_err(RepositoryError::Io)?;
        let record: ActorRecord = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(Some(record))
    }

    fn write(&self, path: &Path, record: &ActorRecord) -> Result<()> {
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(record)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, path).map_err(RepositoryError::Io)?;
        Ok(())
    }
}

impl ActorRepository for FileActorRepository {
    fn load(&self, id: &ActorId) -> Result<Option<ActorRecord>> {
        let path = self.actor_path(id)?;
        let record = self.read(&path)?;
        if record.is_some() {
            tracing::debug!("Loaded actor[{}] from {}", id, path.display());
        }
        Ok(record)
    }

    fn list_ids(&self) -> Result<Vec<ActorId>> {
        let mut ids = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix("actor_")
                    .and_then(|s| s.strip_suffix(".bin"))
            {
                ids.push(ActorId::from(id));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    fn save(&self, record: &ActorRecord) -> Result<()> {
        let path = self.actor_path(&record.id)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        self.write(&path, record)?;
        tracing::debug!("Saved actor[{}] to {}", record.id, path.display());
        Ok(())
    }

    fn commit(&self, expected_revision: u64, record: &ActorRecord) -> Result<u64> {
        let path = self.actor_path(&record.id)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let stored = self
            .read(&path)?
            .ok_or_else(|| RepositoryError::NotFound(record.id.clone()))?;
        if stored.revision != expected_revision {
            return Err(RepositoryError::RevisionConflict {
                id: record.id.clone(),
                expected: expected_revision,
                found: stored.revision,
            });
        }

        let revision = expected_revision + 1;
        let next = ActorRecord {
            revision,
            ..record.clone()
        };
        self.write(&path, &next)?;

        tracing::debug!("Committed actor[{}] at revision {}", record.id, revision);
        Ok(revision)
    }

    fn delete(&self, id: &ActorId) -> Result<()> {
        let path = self.actor_path(id)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted actor[{}]", id);
        }

        Ok(())
    }
}
