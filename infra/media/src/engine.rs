use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use veranda_kernel::safe_nanoid;

use crate::error::{MediaError, MediaErrorExt};

pub(crate) const TMP_MARKER: &str = ".mtmp.";

const STALE_TMP_THRESHOLD: Duration = Duration::from_secs(300);

/// Accepted image content types and the extension stored files receive.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/avif", "avif"),
    ("image/gif", "gif"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/svg+xml", "svg"),
    ("image/webp", "webp"),
];

/// A stored upload: the on-disk file name and the public URL it is
/// served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub file_name: String,
    pub url: String,
}

#[derive(Debug)]
pub(crate) struct MediaInner {
    pub(crate) root: PathBuf,
    pub(crate) public_base: String,
    pub(crate) max_bytes: usize,
    pub(crate) tmp_counter: AtomicU64,
}

/// Filesystem-backed store for uploaded images.
///
/// Files land under one flat directory with generated, unguessable names;
/// the original client file name is never used. Writes go through a
/// temporary file and a rename, so a crashed upload never leaves a
/// half-written image at a served path.
///
/// The handle is cheap to clone and shares the underlying directory.
#[derive(Debug)]
pub struct MediaStore {
    pub(crate) inner: Arc<MediaInner>,
}

impl Clone for MediaStore {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl MediaStore {
    /// Returns a new [`MediaBuilder`](crate::builder::MediaBuilder) with
    /// default configuration.
    #[must_use = "Creates a new media builder with default configuration"]
    pub fn builder() -> crate::builder::MediaBuilder {
        crate::builder::MediaBuilder::new()
    }

    /// Directory uploads are written to.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.inner.root
    }

    /// Upper bound on a single upload, in bytes.
    #[must_use]
    pub fn max_bytes(&self) -> usize {
        self.inner.max_bytes
    }

    /// Persists one uploaded image and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::UnsupportedType`] when `content_type` is not
    /// an accepted image type, [`MediaError::TooLarge`] when `bytes`
    /// exceeds the configured ceiling, and [`MediaError::Io`] on write
    /// failures.
    pub async fn store(&self, content_type: &str, bytes: &[u8]) -> Result<StoredMedia, MediaError> {
        let extension = extension_for(content_type).ok_or_else(|| MediaError::UnsupportedType {
            message: format!("Only image uploads are accepted, got `{content_type}`").into(),
            context: None,
        })?;

        if bytes.len() > self.inner.max_bytes {
            return Err(MediaError::TooLarge {
                message: format!(
                    "File exceeds the upload limit of {} bytes",
                    self.inner.max_bytes
                )
                .into(),
                context: None,
            });
        }

        let file_name = self.reserve_name(extension).await?;
        let target = self.inner.root.join(&file_name);
        let tmp = self.unique_tmp_path(&file_name);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp)
            .await
            .context(format!("Failed to create temporary upload: {}", tmp.display()))?;
        file.write_all(bytes)
            .await
            .context(format!("Failed to write upload: {}", tmp.display()))?;
        file.sync_all()
            .await
            .context(format!("Failed to sync upload: {}", tmp.display()))?;
        drop(file);

        fs::rename(&tmp, &target)
            .await
            .context(format!("Failed to publish upload: {}", target.display()))?;

        debug!(file = %file_name, bytes = bytes.len(), "Stored upload");

        let url = format!("{}/{file_name}", self.inner.public_base);
        Ok(StoredMedia { file_name, url })
    }

    /// Picks a generated name no existing file occupies.
    async fn reserve_name(&self, extension: &str) -> Result<String, MediaError> {
        loop {
            let candidate = format!("{}.{extension}", safe_nanoid!());
            let occupied = fs::try_exists(self.inner.root.join(&candidate))
                .await
                .context("Failed to probe upload directory")?;
            if !occupied {
                return Ok(candidate);
            }
        }
    }

    fn unique_tmp_path(&self, file_name: &str) -> PathBuf {
        let n = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.inner.root.join(format!("{file_name}{TMP_MARKER}{n}"))
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(accepted, _)| *accepted == essence)
        .map(|(_, extension)| *extension)
}

/// Removes temporary upload files abandoned by previous crashes. Files
/// younger than the threshold are kept; their writer may still be alive.
pub(crate) async fn purge_tmp(dir: &std::path::Path) {
    let dir = dir.to_path_buf();

    let outcome = tokio::task::spawn_blocking(move || {
        let mut removed = 0_usize;
        for entry in std::fs::read_dir(&dir)?.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.contains(TMP_MARKER) {
                continue;
            }
            let stale = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .ok()
                .and_then(|modified| SystemTime::now().duration_since(modified).ok())
                .is_none_or(|age| age > STALE_TMP_THRESHOLD);
            if stale && std::fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
        Ok::<_, std::io::Error>(removed)
    })
    .await;

    match outcome {
        Ok(Ok(0)) => {}
        Ok(Ok(removed)) => info!(removed, "Purged stale temporary uploads"),
        Ok(Err(err)) => error!(%err, "Failed to scan upload directory for temporary files"),
        Err(err) => error!(%err, "Temporary upload purge task failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup_normalizes_the_essence() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("IMAGE/PNG"), Some("png"));
        assert_eq!(extension_for("image/svg+xml; charset=utf-8"), Some("svg"));
        assert_eq!(extension_for("text/html"), None);
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(extension_for(""), None);
    }
}
