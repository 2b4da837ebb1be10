//! Core document store implementation providing serialized, atomic whole-document commits.
//!
//! This module contains the primary [`DocumentStore`] handle. Reads return the
//! last committed snapshot without touching the disk; every mutation passes
//! through a single writer gate, so concurrent updates to unrelated members of
//! the document can never lose each other's writes.

use crate::builder::StoreBuilder;
use crate::document::Document;
use crate::error::{StoreError, StoreErrorExt};
use crate::maintenance::TMP_MARKER;
use parking_lot::RwLock;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    Lz4,
}

impl Compression {
    #[must_use]
    pub(crate) fn compress(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(data),
        }
    }

    pub(crate) fn decompress(self, data: &[u8]) -> Result<Vec<u8>, StoreError> {
        match self {
            Self::None => Ok(data.to_vec()),
            Self::Lz4 => {
                lz4_flex::decompress_size_prepended(data).context("Lz4 decompression failed")
            },
        }
    }
}

/// Outcome of a mutation closure: whether the draft must be committed.
#[derive(Debug)]
pub enum Mutation<T> {
    /// The draft changed; persist it and publish the new snapshot.
    Commit(T),
    /// Nothing changed; keep the prior snapshot and skip the write.
    Noop(T),
}

/// The internal shared state of a [`DocumentStore`] instance.
#[derive(Debug)]
pub struct StoreInner<D> {
    /// Canonicalized path of the document file on disk.
    pub(crate) path: PathBuf,
    /// Whether transparent LZ4 compression is enabled for the on-disk form.
    pub(crate) compression: Compression,
    /// Whether the on-disk JSON is pretty-printed for human inspection.
    pub(crate) pretty: bool,
    /// A unique counter used to generate temporary file names.
    pub(crate) tmp_counter: AtomicU64,
    /// Commit counter, for observability only.
    pub(crate) revision: AtomicU64,
    /// Last committed document, shared read-only with all callers.
    pub(crate) snapshot: RwLock<Arc<D>>,
    /// Single-writer arbiter: every load-modify-save passes through here.
    pub(crate) write_gate: Mutex<()>,
}

/// A thread-safe handle to one durable document.
///
/// `DocumentStore` keeps the entire dataset as a single serialized document:
/// - **Snapshot reads**: [`snapshot`](Self::snapshot) hands out the last
///   committed document without locking the writer or touching the disk.
/// - **Serialized commits**: [`update`](Self::update) runs a closure against
///   a private draft under a single writer gate and persists the result, so
///   two concurrent mutations can never clobber each other.
/// - **Atomic writes**: persistence uses unique temp files, `fsync`, and
///   rename, so a crash never leaves a half-written document.
/// - **Self-healing**: stale temporary files from previous crashes are purged
///   when the store opens.
///
/// The handle is internally reference-counted (`Arc`) and can be cheaply
/// cloned across threads or tasks.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use veranda_store::{DocumentStore, Mutation, StoreError};
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// struct Notes {
///     entries: Vec<String>,
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), StoreError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     # let path = tmp.path().join("notes.json");
///     let store = DocumentStore::<Notes>::builder().path(&path).open().await?;
///
///     store
///         .update(|doc| {
///             doc.entries.push("first".to_owned());
///             Ok(Mutation::Commit(()))
///         })
///         .await?;
///
///     assert_eq!(store.snapshot().entries, ["first"]);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DocumentStore<D: Document> {
    pub(crate) inner: Arc<StoreInner<D>>,
}

impl<D: Document> Clone for DocumentStore<D> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<D: Document> Deref for DocumentStore<D> {
    type Target = StoreInner<D>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<D: Document> DocumentStore<D> {
    #[must_use = "The store is not opened until you call .open()"]
    pub fn builder() -> StoreBuilder<D> {
        StoreBuilder::new()
    }

    /// Returns the last committed document.
    ///
    /// The returned `Arc` stays valid and immutable even while later commits
    /// publish newer snapshots.
    #[must_use]
    pub fn snapshot(&self) -> Arc<D> {
        Arc::clone(&self.snapshot.read())
    }

    /// Canonical path of the document file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `mutate` against a private draft of the document and commits the
    /// result atomically.
    ///
    /// The closure decides whether its changes need persisting by returning
    /// [`Mutation::Commit`] or [`Mutation::Noop`]. All callers are serialized
    /// through the writer gate; the draft always starts from the latest
    /// committed snapshot, so no concurrent update can be lost. If the
    /// closure fails or the write fails, the previously committed snapshot
    /// stays untouched in memory and on disk.
    ///
    /// # Errors
    /// Propagates the closure's error, or [`StoreError::Io`] /
    /// [`StoreError::Malformed`] if serialization or the durable write fails.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut D) -> Result<Mutation<T>, StoreError>,
    {
        let _gate = self.write_gate.lock().await;

        let mut draft = self.snapshot.read().as_ref().clone();
        match mutate(&mut draft)? {
            Mutation::Noop(out) => Ok(out),
            Mutation::Commit(out) => {
                let committed = Arc::new(draft);
                self.persist(&committed).await?;
                *self.snapshot.write() = committed;

                let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(revision, "Document committed");
                Ok(out)
            },
        }
    }

    /// Re-reads the durable medium, replacing the in-memory snapshot.
    ///
    /// # Errors
    /// Returns [`StoreError::FileNotFound`], [`StoreError::Io`],
    /// [`StoreError::Decompress`], or [`StoreError::Malformed`] if the
    /// document cannot be read back.
    pub async fn reload(&self) -> Result<(), StoreError> {
        let _gate = self.write_gate.lock().await;

        let document = Self::load(&self.path, self.compression).await?;
        *self.snapshot.write() = Arc::new(document);
        Ok(())
    }

    pub(crate) async fn load(path: &Path, compression: Compression) -> Result<D, StoreError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::FileNotFound {
                    message: path.display().to_string().into(),
                    context: None,
                });
            },
            Err(err) => {
                return Err(StoreError::Io {
                    source: err,
                    context: Some(format!("Document read failed: {}", path.display()).into()),
                });
            },
        };

        let raw = compression.decompress(&bytes)?;
        serde_json::from_slice(&raw)
            .context(format!("Document parse failed: {}", path.display()))
    }

    pub(crate) async fn persist(&self, document: &D) -> Result<(), StoreError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(document)
        } else {
            serde_json::to_vec(document)
        }
        .context("Document serialization failed")?;

        let payload = self.compression.compress(&encoded);
        let temp = unique_tmp_path(&self.path, &self.tmp_counter);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&payload).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &self.path).await {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                fs::remove_file(&self.path).await.context(format!(
                    "Failed to replace existing document: {}",
                    self.path.display()
                ))?;
                fs::rename(&temp, &self.path).await.context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    self.path.display()
                ))?;
            } else {
                return Err(StoreError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), self.path.display())
                            .into(),
                    ),
                });
            }
        }

        if let Some(parent) = self.path.parent() {
            Self::sync_dir(parent).await;
        }

        debug!(path = %self.path.display(), "Document saved atomically");
        Ok(())
    }

    async fn sync_dir(path: &Path) {
        match fs::File::open(path).await {
            Ok(dir) => {
                if let Err(err) = dir.sync_all().await {
                    tracing::warn!(path = %path.display(), error = %err, "Directory sync failed");
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Directory open failed");
            },
        }
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("document");
    let tmp_name = format!("{file_name}{TMP_MARKER}{counter}");
    target.with_file_name(tmp_name)
}
