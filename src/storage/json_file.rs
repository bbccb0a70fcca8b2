//! JSON file storage backend
//!
//! Each collection lives in one UTF-8 file holding a top-level JSON array.
//! Loads read and parse the whole file; saves serialize the whole collection
//! to a sibling `*.tmp` file and rename it over the original, so readers
//! never observe a half-written array.
//!
//! Every save uses its own temporary file name, and a missing file is created
//! with `create_new`, so concurrent writers never clobber each other's
//! temporary file. There is no locking at this level: two saves of the same
//! file race and the last rename wins.

use crate::core::error::{CollectionError, ListingsError, ListingsResult, StorageError};
use crate::core::store::DocumentStore;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;

/// Distinguishes temporary files of saves running at the same time
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// What `load` does when the collection file does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFile {
    /// Fail with a not-found error (the listings file must be provisioned)
    Required,
    /// Create the file holding `[]` and return an empty collection
    CreateEmpty,
}

/// A collection stored as a JSON array in a single file
///
/// # Example
///
/// ```rust,ignore
/// let favorites = JsonFileStore::<FavoriteRecord>::create_if_missing("favorite", "favoritos.json");
/// let mut records = favorites.load().await?;
/// records.push(favorite);
/// favorites.save(&records).await?;
/// ```
pub struct JsonFileStore<T> {
    collection: String,
    path: PathBuf,
    missing: MissingFile,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(collection: impl Into<String>, path: impl Into<PathBuf>, missing: MissingFile) -> Self {
        Self {
            collection: collection.into(),
            path: path.into(),
            missing,
            _marker: PhantomData,
        }
    }

    /// A store whose file must already exist
    pub fn required(collection: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(collection, path, MissingFile::Required)
    }

    /// A store that creates an empty file on first access
    pub fn create_if_missing(collection: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(collection, path, MissingFile::CreateEmpty)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("collection"));
        name.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        self.path.with_file_name(name)
    }

    /// File contents, `None` when the file does not exist
    async fn read(&self) -> ListingsResult<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Create the file holding `[]`; `false` when it already exists
    async fn create_empty(&self) -> ListingsResult<bool> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(self.io_error(e)),
        };
        file.write_all(b"[]").await.map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        tracing::info!(
            collection = %self.collection,
            path = %self.path.display(),
            "Created empty collection file"
        );
        Ok(true)
    }

    fn io_error(&self, err: io::Error) -> ListingsError {
        StorageError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl<T> DocumentStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn load(&self) -> ListingsResult<Vec<T>> {
        let bytes = match self.read().await? {
            Some(bytes) => bytes,
            None => match self.missing {
                MissingFile::Required => {
                    return Err(CollectionError::FileMissing {
                        collection: self.collection.clone(),
                        path: self.path.display().to_string(),
                    }
                    .into());
                }
                MissingFile::CreateEmpty => {
                    if self.create_empty().await? {
                        return Ok(Vec::new());
                    }
                    // Created by a concurrent writer in the meantime
                    self.read().await?.unwrap_or_default()
                }
            },
        };

        // Blank file: empty collection
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let records: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            collection = %self.collection,
            count = records.len(),
            "Loaded collection"
        );
        Ok(records)
    }

    async fn save(&self, records: &[T]) -> ListingsResult<()> {
        let bytes = serde_json::to_vec(records)
            .map_err(|e| ListingsError::Internal(format!("encode {}: {}", self.collection, e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(
            collection = %self.collection,
            count = records.len(),
            "Saved collection"
        );
        Ok(())
    }
}
