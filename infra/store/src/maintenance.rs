use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{error, info};

/// Marker embedded in temporary file names produced by the atomic writer.
pub(crate) const TMP_MARKER: &str = ".vtmp.";

/// Removes stale temporary files left next to the document by crashed writers.
///
/// Fresh temp files are left alone; another process may still be mid-write.
pub(crate) async fn purge_tmp(dir: &Path) {
    let dir = dir.to_path_buf();
    let now = SystemTime::now();
    let threshold = Duration::from_secs(300);

    match tokio::task::spawn_blocking(move || remove_stale(&dir, now, threshold)).await {
        Ok((removed, failed)) if removed > 0 || failed > 0 => {
            info!(removed, failed, "Cleaned up temporary files");
        },
        Err(e) => {
            error!(error = %e, "Temp file cleanup task panicked");
        },
        _ => {},
    }
}

fn remove_stale(dir: &Path, now: SystemTime, threshold: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    let Ok(entries) = std::fs::read_dir(dir) else {
        return (removed, failed);
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !is_tmp(&path) || !is_stale(&path, now, threshold) {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => {
                tracing::warn!(p = %path.display(), err = %e, "IO fail");
                failed += 1;
            },
        }
    }

    (removed, failed)
}

fn is_tmp(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(path: &Path, now: SystemTime, threshold: Duration) -> bool {
    std::fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > threshold)
}
