//! Process-unique temp files and the atomic-commit guard.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Produces a unique temp path next to `cache_path`:
/// `<cache_path>.<pid>-<random hex>.tmp`.
///
/// Colocating the temp file with its final destination keeps the eventual
/// rename on one filesystem, which is what makes the commit atomic. The
/// pid plus random suffix means concurrent writers for the same cache key
/// never collide on the temp name.
#[must_use]
pub fn temp_file_path(cache_path: &Path) -> PathBuf {
    let mut name = cache_path.as_os_str().to_os_string();
    name.push(format!(
        ".{}-{:x}.tmp",
        std::process::id(),
        rand::random::<u64>()
    ));
    PathBuf::from(name)
}

/// Scoped owner of an in-progress cache write.
///
/// The guard allocates the temp path up front; the caller streams bytes
/// into it and then calls [`commit`](Self::commit) to rename it onto the
/// final cache path. On every other exit path, including a failed rename,
/// dropping the guard removes the temp file so crashed or failed fetches
/// never leave an observable cache entry.
#[derive(Debug)]
pub struct TempFileGuard {
    path: PathBuf,
    committed: bool,
}

impl TempFileGuard {
    /// Allocates a temp path for a pending write to `cache_path`.
    #[must_use]
    pub fn new(cache_path: &Path) -> Self {
        Self {
            path: temp_file_path(cache_path),
            committed: false,
        }
    }

    /// The temp path to stream into.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically renames the temp file onto `cache_path`.
    ///
    /// # Errors
    ///
    /// Propagates the rename failure; the temp file is removed by the
    /// guard's drop in that case.
    pub fn commit(mut self, cache_path: &Path) -> std::io::Result<()> {
        std::fs::rename(&self.path, cache_path)?;
        self.committed = true;
        debug!(path = %cache_path.display(), "cache entry committed");
        Ok(())
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if !self.committed {
            // Best effort: the temp file may never have been created.
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_shape() {
        let cached = PathBuf::from("/cache/_prebuilds/https-foo.com-a.tar.gz");
        let temp = temp_file_path(&cached);
        let name = temp.to_str().unwrap();
        assert!(name.starts_with("/cache/_prebuilds/https-foo.com-a.tar.gz."));
        assert!(name.ends_with(".tmp"));
        let middle = name
            .strip_prefix("/cache/_prebuilds/https-foo.com-a.tar.gz.")
            .unwrap()
            .strip_suffix(".tmp")
            .unwrap();
        let (pid, hex) = middle.split_once('-').unwrap();
        assert_eq!(pid, std::process::id().to_string());
        assert!(!hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_temp_paths_are_unique_per_call() {
        let cached = PathBuf::from("/cache/entry.tar.gz");
        assert_ne!(temp_file_path(&cached), temp_file_path(&cached));
    }

    #[test]
    fn test_temp_path_does_not_exist_at_call_time() {
        let dir = TempDir::new().unwrap();
        let cached = dir.path().join("entry.tar.gz");
        assert!(!temp_file_path(&cached).exists());
    }

    #[test]
    fn test_guard_removes_uncommitted_file_on_drop() {
        let dir = TempDir::new().unwrap();
        let cached = dir.path().join("entry.tar.gz");
        let temp_path;
        {
            let guard = TempFileGuard::new(&cached);
            std::fs::write(guard.path(), b"partial").unwrap();
            temp_path = guard.path().to_path_buf();
            assert!(temp_path.exists());
        }
        assert!(!temp_path.exists(), "dropped guard must remove temp file");
        assert!(!cached.exists(), "final path must stay untouched");
    }

    #[test]
    fn test_guard_commit_renames_into_place() {
        let dir = TempDir::new().unwrap();
        let cached = dir.path().join("entry.tar.gz");
        let guard = TempFileGuard::new(&cached);
        std::fs::write(guard.path(), b"artifact bytes").unwrap();
        let temp_path = guard.path().to_path_buf();

        guard.commit(&cached).unwrap();

        assert!(!temp_path.exists(), "temp file gone after commit");
        assert_eq!(std::fs::read(&cached).unwrap(), b"artifact bytes");
    }

    #[test]
    fn test_guard_commit_failure_cleans_temp() {
        let dir = TempDir::new().unwrap();
        let cached = dir.path().join("missing-subdir").join("entry.tar.gz");
        let guard = TempFileGuard::new(&dir.path().join("entry.tar.gz"));
        std::fs::write(guard.path(), b"bytes").unwrap();
        let temp_path = guard.path().to_path_buf();

        assert!(guard.commit(&cached).is_err());
        assert!(!temp_path.exists(), "temp removed after failed rename");
    }
}
