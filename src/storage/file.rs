//! File-based allocation storage.
//!
//! Stores one JSON record per token digest plus a counter file holding the
//! highest assigned index. File locking makes index assignment atomic across
//! processes; exclusive record creation (`create_new`) provides the
//! first-writer-wins guarantee. Suitable for development and single-node
//! deployments.
//!
//! Directory structure:
//! ```text
//! data/
//! ├── allocations/
//! │   └── {digest}.json
//! └── allocations.counter
//! ```

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use fs2::FileExt;
use tokio::sync::Mutex;

use crate::config::FileStorageConfig;
use crate::domain::AllocationRecord;
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::AllocationStore;

/// File-based allocation store implementation.
pub struct FileAllocationStore {
    /// Base data directory.
    base_dir: PathBuf,
    /// Directory holding one record file per digest.
    records_dir: PathBuf,
    /// Counter file holding the highest assigned index.
    counter_path: PathBuf,
    /// Mutex for coordinating file operations within this process.
    lock: Mutex<()>,
}

impl FileAllocationStore {
    /// Create a new file allocation store.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directories cannot be created.
    pub fn new(config: &FileStorageConfig) -> StorageResult<Self> {
        let base_dir = config.data_dir.clone();
        let records_dir = base_dir.join("allocations");

        for dir in [&base_dir, &records_dir] {
            std::fs::create_dir_all(dir).map_err(|e| {
                StorageError::FileIO(format!("Failed to create directory {dir:?}: {e}"))
            })?;
        }

        Ok(Self {
            counter_path: base_dir.join("allocations.counter"),
            records_dir,
            base_dir,
            lock: Mutex::new(()),
        })
    }

    fn record_path(&self, token_digest: &str) -> PathBuf {
        self.records_dir.join(format!("{token_digest}.json"))
    }

    /// Read a record file under an exclusive lock.
    fn read_record_locked(&self, token_digest: &str) -> StorageResult<Option<AllocationRecord>> {
        let path = self.record_path(token_digest);

        if !path.exists() {
            return Ok(None);
        }

        let file = std::fs::File::open(&path)?;
        file.lock_exclusive()?;

        let record: AllocationRecord = serde_json::from_reader(&file)?;
        file.unlock()?;

        Ok(Some(record))
    }

    /// Reserve the next allocation index.
    ///
    /// The counter file stays exclusively locked for the duration of the
    /// closure, so index reservation and record creation happen under one
    /// cross-process critical section. The counter is persisted before the
    /// record file is created; a crash in between skips an index, it never
    /// reuses one.
    fn assign_index(&self, token_digest: &str) -> StorageResult<bool> {
        let mut counter_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.counter_path)?;

        counter_file.lock_exclusive()?;
        let result = self.assign_index_locked(&mut counter_file, token_digest);
        counter_file.unlock()?;
        result
    }

    fn assign_index_locked(
        &self,
        counter_file: &mut std::fs::File,
        token_digest: &str,
    ) -> StorageResult<bool> {
        let mut contents = String::new();
        counter_file.read_to_string(&mut contents)?;

        let current: u64 = if contents.trim().is_empty() {
            0
        } else {
            contents.trim().parse().map_err(|_| {
                StorageError::Serialization(format!(
                    "corrupt counter file {:?}: {contents:?}",
                    self.counter_path
                ))
            })?
        };
        let next = current + 1;

        counter_file.seek(SeekFrom::Start(0))?;
        counter_file.set_len(0)?;
        counter_file.write_all(next.to_string().as_bytes())?;
        counter_file.sync_all()?;

        // Exclusive creation decides the first-writer-wins race against
        // other processes that passed the existence check concurrently.
        let record_file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.record_path(token_digest))
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let record = AllocationRecord {
            token_digest: token_digest.to_string(),
            index: next,
            created_at: chrono::Utc::now(),
        };
        serde_json::to_writer_pretty(&record_file, &record)?;
        record_file.sync_all()?;

        Ok(true)
    }
}

#[async_trait]
impl AllocationStore for FileAllocationStore {
    async fn get(&self, token_digest: &str) -> StorageResult<Option<AllocationRecord>> {
        let _guard = self.lock.lock().await;
        self.read_record_locked(token_digest)
    }

    async fn try_insert(&self, token_digest: &str) -> StorageResult<bool> {
        let _guard = self.lock.lock().await;

        if self.record_path(token_digest).exists() {
            return Ok(false);
        }

        self.assign_index(token_digest)
    }

    async fn health_check(&self) -> StorageResult<()> {
        if !self.base_dir.exists() {
            return Err(StorageError::Unavailable);
        }

        let test_file = self.base_dir.join(".health_check");
        tokio::fs::write(&test_file, b"ok")
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check failed: {e}")))?;
        tokio::fs::remove_file(&test_file)
            .await
            .map_err(|e| StorageError::FileIO(format!("Health check cleanup failed: {e}")))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
