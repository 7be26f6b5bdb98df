//! Per-article scratch resources.
//!
//! Scratch data is registered under an article's link hash and released in
//! one call once parsing is done. [`LocalStorage`] keeps it as files named
//! `{link_hash}_{name}`; other backends only need the same two operations.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Registry of scratch resources keyed by link hash.
pub trait ResourceRegistry: Send + Sync {
    /// Store scratch bytes under `link_hash`.
    ///
    /// Producer side of the registry: a stage or custom collaborator that
    /// caches per-article data (partial downloads, thumbnails) writes it here,
    /// and `Article::parse` releases it once the body is done. The standard
    /// collaborators keep nothing on disk.
    fn store(&self, link_hash: &str, name: &str, bytes: &[u8]) -> Result<()>;

    /// Delete everything registered under `link_hash`. Best-effort: failures are
    /// swallowed.
    fn release(&self, link_hash: &str);
}

/// Filesystem registry rooted at the configured storage path.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn prefix(link_hash: &str) -> String {
        format!("{link_hash}_")
    }
}

impl ResourceRegistry for LocalStorage {
    fn store(&self, link_hash: &str, name: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(format!("{}{name}", Self::prefix(link_hash)));
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn release(&self, link_hash: &str) {
        if link_hash.is_empty() {
            return;
        }
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return;
        };

        let prefix = Self::prefix(link_hash);
        let mut removed = 0usize;
        for entry in entries.flatten() {
            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&prefix));
            if matches && std::fs::remove_file(entry.path()).is_ok() {
                removed += 1;
            }
        }
        tracing::debug!(link_hash, removed, "released scratch resources");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_removes_only_matching_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.store("abc", "img1", b"one").unwrap();
        storage.store("abc", "img2", b"two").unwrap();
        storage.store("abcd", "img1", b"other").unwrap();
        std::fs::write(dir.path().join("unrelated.txt"), b"keep").unwrap();

        storage.release("abc");

        let mut left: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, vec!["abcd_img1", "unrelated.txt"]);
    }

    #[test]
    fn test_release_missing_directory_is_silent() {
        let storage = LocalStorage::new("/definitely/not/a/real/dir");
        storage.release("abc");
    }

    #[test]
    fn test_release_empty_hash_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        std::fs::write(dir.path().join("_stray"), b"x").unwrap();

        storage.release("");

        assert!(dir.path().join("_stray").exists());
    }
}
