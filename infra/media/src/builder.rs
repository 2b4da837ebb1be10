use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use private::Sealed;
use tokio::fs;
use tracing::info;

use crate::engine::{self, MediaInner, MediaStore};
use crate::error::{MediaError, MediaErrorExt};

const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_PUBLIC_BASE: &str = "/uploads";

#[derive(Debug, Clone)]
struct MediaConfig {
    max_bytes: usize,
    public_base: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { max_bytes: DEFAULT_MAX_BYTES, public_base: DEFAULT_PUBLIC_BASE.to_string() }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug)]
pub struct MediaBuilder<S: Sealed = NoRoot> {
    state: S,
    config: MediaConfig,
}

impl Default for MediaBuilder<NoRoot> {
    fn default() -> Self {
        Self { state: NoRoot, config: MediaConfig::default() }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> MediaBuilder<S> {
    #[must_use = "Sets the per-file upload ceiling in bytes"]
    pub const fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.config.max_bytes = max_bytes;
        self
    }

    /// URL prefix stored files are served under, e.g. `/uploads`.
    #[must_use = "Sets the public URL prefix for stored files"]
    pub fn public_base(mut self, base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        self.config.public_base = base;
        self
    }
}

impl MediaBuilder<NoRoot> {
    #[must_use = "Creates a new media builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the directory uploads are stored in"]
    pub fn root(self, root: impl Into<PathBuf>) -> MediaBuilder<WithRoot> {
        MediaBuilder { state: WithRoot(root.into()), config: self.config }
    }
}

impl MediaBuilder<WithRoot> {
    /// Consumes the configuration and opens the upload directory,
    /// creating it when absent and purging temporary files abandoned by
    /// previous crashes.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Io`] when the directory cannot be created or
    /// resolved.
    pub async fn open(self) -> Result<MediaStore, MediaError> {
        let root = self.state.0;

        fs::create_dir_all(&root)
            .await
            .context(format!("Failed to bootstrap upload directory: {}", root.display()))?;

        let canonical = fs::canonicalize(&root)
            .await
            .context(format!("Failed to resolve upload directory: {}", root.display()))?;

        engine::purge_tmp(&canonical).await;

        info!(root = %canonical.display(), "Opened upload directory");

        Ok(MediaStore {
            inner: Arc::new(MediaInner {
                root: canonical,
                public_base: self.config.public_base,
                max_bytes: self.config.max_bytes,
                tmp_counter: AtomicU64::new(1),
            }),
        })
    }
}
