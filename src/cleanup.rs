use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

use crate::error::{Result, SupercutError};

/// Subtitle files to remove once the run is over, in the order they were marked
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingDeletions {
    paths: Vec<PathBuf>,
}

impl PendingDeletions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path`; returns false when it was already marked
    pub fn mark(&mut self, path: &Path) -> bool {
        if self.paths.iter().any(|marked| marked == path) {
            return false;
        }
        self.paths.push(path.to_path_buf());
        true
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Remove every marked file. Missing files are tolerated, other failures are
    /// collected so the whole set is always attempted.
    pub async fn sweep(self) -> CleanupReport {
        let mut report = CleanupReport::default();

        for path in self.paths {
            match fs::remove_file(&path).await {
                Ok(()) => {
                    info!("Deleted {}", path.display());
                    report.removed.push(path);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!("Already gone, nothing to delete: {}", path.display());
                    report.missing.push(path);
                }
                Err(e) => {
                    error!("Failed to delete {}: {}", path.display(), e);
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        report
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl CleanupReport {
    pub fn total(&self) -> usize {
        self.removed.len() + self.missing.len() + self.failed.len()
    }

    /// Error out when any removal failed for a reason other than absence
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(SupercutError::Cleanup {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_at_most_once() {
        let mut pending = PendingDeletions::new();
        assert!(pending.mark(Path::new("/tmp/a.srt")));
        assert!(pending.mark(Path::new("/tmp/b.srt")));
        assert!(!pending.mark(Path::new("/tmp/a.srt")));

        assert_eq!(pending.len(), 2);
        assert!(!pending.is_empty());
        assert!(PendingDeletions::new().is_empty());
    }

    #[tokio::test]
    async fn test_sweep_removes_in_order_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.srt");
        let gone = dir.path().join("gone.srt");
        let second = dir.path().join("second.srt");
        std::fs::write(&first, "").unwrap();
        std::fs::write(&second, "").unwrap();

        let mut pending = PendingDeletions::new();
        pending.mark(&first);
        pending.mark(&gone);
        pending.mark(&second);

        let report = pending.sweep().await.into_result().unwrap();

        assert_eq!(report.removed, vec![first.clone(), second.clone()]);
        assert_eq!(report.missing, vec![gone]);
        assert!(!first.exists());
        assert!(!second.exists());
    }

    #[tokio::test]
    async fn test_unremovable_path_fails_after_full_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let directory = dir.path().join("not-a-file.srt");
        std::fs::create_dir(&directory).unwrap();
        let after = dir.path().join("after.srt");
        std::fs::write(&after, "").unwrap();

        let mut pending = PendingDeletions::new();
        pending.mark(&directory);
        pending.mark(&after);

        let report = pending.sweep().await;
        assert_eq!(report.failed.len(), 1);
        assert!(!after.exists());

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, SupercutError::Cleanup { failed: 1, total: 2 }));
    }
}
