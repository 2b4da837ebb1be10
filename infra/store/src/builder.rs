use crate::document::Document;
use crate::engine::{Compression, DocumentStore, StoreInner};
use crate::error::{StoreError, StoreErrorExt};
use crate::maintenance;
use parking_lot::RwLock;
use private::Sealed;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone)]
struct StoreConfig {
    compression: Compression,
    create: bool,
    pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { compression: Compression::None, create: true, pretty: true }
    }
}

#[derive(Debug, Default)]
pub struct NoPath;
#[derive(Debug)]
pub struct WithPath(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoPath {}
impl Sealed for WithPath {}

#[allow(private_bounds)]
#[derive(Debug)]
pub struct StoreBuilder<D: Document, S: Sealed = NoPath> {
    state: S,
    config: StoreConfig,
    _document: PhantomData<D>,
}

impl<D: Document> Default for StoreBuilder<D, NoPath> {
    fn default() -> Self {
        Self { state: NoPath, config: StoreConfig::default(), _document: PhantomData }
    }
}

#[allow(private_bounds)]
impl<D: Document, S: Sealed> StoreBuilder<D, S> {
    #[must_use = "Sets compression for the on-disk document"]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.config.compression = compression;
        self
    }

    #[must_use = "Sets whether a missing document is seeded from defaults"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    #[must_use = "Sets whether the on-disk JSON is pretty-printed"]
    pub const fn pretty(mut self, enable: bool) -> Self {
        self.config.pretty = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> StoreBuilder<D, N> {
        StoreBuilder { state, config: self.config, _document: PhantomData }
    }
}

impl<D: Document> StoreBuilder<D, NoPath> {
    #[must_use = "Creates a new store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the document file path for the store"]
    pub fn path(self, path: impl Into<PathBuf>) -> StoreBuilder<D, WithPath> {
        self.transition(WithPath(path.into()))
    }
}

impl<D: Document> StoreBuilder<D, WithPath> {
    /// Consumes the configuration and opens the store.
    ///
    /// Boot sequence:
    /// 1. **Bootstrapping**: creates the parent directory if `create(true)`
    ///    was set (the default).
    /// 2. **Canonicalization**: resolves the directory to an absolute
    ///    physical path so later renames cannot be redirected by symlinks.
    /// 3. **Self-healing**: purges stale temporary files abandoned by
    ///    previous crashes.
    /// 4. **Load or seed**: parses the existing document, or seeds it from
    ///    `D::default()` and persists the seed when the file is absent and
    ///    creation is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FileNotFound`] if the document is absent and
    /// `create` is false, [`StoreError::Io`] on filesystem failures, and
    /// [`StoreError::Malformed`] / [`StoreError::Decompress`] if existing
    /// content cannot be parsed.
    pub async fn open(self) -> Result<DocumentStore<D>, StoreError> {
        let path = &self.state.0;

        let Some(file_name) = path.file_name() else {
            return Err(StoreError::FileNotFound {
                message: path.display().to_string().into(),
                context: Some("Document path must name a file".into()),
            });
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if self.config.create {
            fs::create_dir_all(&dir)
                .await
                .context(format!("Failed to bootstrap document directory: {}", dir.display()))?;
        }

        let canonical_dir = fs::canonicalize(&dir)
            .await
            .context(format!("Failed to resolve document directory: {}", dir.display()))?;
        let canonical = canonical_dir.join(file_name);

        maintenance::purge_tmp(&canonical_dir).await;

        let (document, seeded) = Self::load_or_seed(&canonical, &self.config).await?;

        let store = DocumentStore {
            inner: Arc::new(StoreInner {
                path: canonical,
                compression: self.config.compression,
                pretty: self.config.pretty,
                tmp_counter: AtomicU64::new(1),
                revision: AtomicU64::new(0),
                snapshot: RwLock::new(Arc::new(document)),
                write_gate: Mutex::new(()),
            }),
        };

        if seeded {
            let snapshot = store.snapshot();
            store.persist(&snapshot).await.context("Failed to persist seeded document")?;
            info!(path = %store.path().display(), "Seeded new document");
        } else {
            info!(path = %store.path().display(), "Opened existing document");
        }

        Ok(store)
    }

    async fn load_or_seed(path: &Path, config: &StoreConfig) -> Result<(D, bool), StoreError> {
        match DocumentStore::<D>::load(path, config.compression).await {
            Ok(document) => Ok((document, false)),
            Err(StoreError::FileNotFound { .. }) if config.create => Ok((D::default(), true)),
            Err(err) => Err(err),
        }
    }
}
