use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Error type for TaskFileStore operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Represents a failure to read or write the task file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Represents a task file that does not hold a JSON array.
    #[error("Task file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Stores the whole task collection as one pretty-printed JSON array on disk.
///
/// The contents are opaque to the store: any JSON array is accepted and
/// returned as-is. Writes are serialized and land via a temporary file and a
/// rename, so readers never observe a half-written file.
#[derive(Debug)]
pub struct TaskFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TaskFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Creates the task file holding `[]` if it does not exist yet.
    ///
    /// # Returns
    ///
    /// `true` when the file was created, `false` when it was already there.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn init(&self) -> Result<bool, StorageError> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| self.io_error(e))?
        {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        self.write_all(&[]).await?;
        tracing::info!("Initialized empty task file");
        Ok(true)
    }

    /// Reads the stored collection.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn read_all(&self) -> Result<Vec<Value>, StorageError> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        serde_json::from_slice(&data).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the stored collection with `tasks`.
    #[tracing::instrument(skip(self, tasks), fields(path = %self.path.display(), count = tasks.len()))]
    pub async fn write_all(&self, tasks: &[Value]) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(tasks).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        let _guard = self.write_lock.lock().await;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &data)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        tracing::debug!("Wrote {} tasks", tasks.len());
        Ok(())
    }
}
