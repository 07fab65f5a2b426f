//! Default filesystem-backed and in-memory port implementations.

use crate::ports::{CandidateFilter, FileStore, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use glob::{Pattern, glob};
use seedfix_edit::{EditError, EditResult, backup_path};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use tracing::{debug, warn};

/// Seed documents on the local filesystem. Writes go through `seedfix_edit::write_atomic`.
#[derive(Debug, Clone, Default)]
pub struct FsFileStore;

impl FileStore for FsFileStore {
    fn list_candidates(
        &self,
        dir: &Utf8Path,
        filter: &CandidateFilter,
    ) -> anyhow::Result<Vec<Utf8PathBuf>> {
        if !dir.is_dir() {
            anyhow::bail!("candidate directory {dir} does not exist or is not a directory");
        }

        let pattern = format!(
            "{}/{}*{}",
            Pattern::escape(dir.as_str()),
            Pattern::escape(&filter.prefix),
            Pattern::escape(&filter.suffix)
        );
        debug!(pattern = %pattern, "scanning for candidate documents");

        let mut out = Vec::new();
        for entry in glob(&pattern).with_context(|| format!("glob {pattern}"))? {
            let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
            let path = match Utf8PathBuf::from_path_buf(path) {
                Ok(p) => p,
                Err(p) => {
                    warn!(path = %p.display(), "skipping non UTF-8 path");
                    continue;
                }
            };
            if !path.is_file() || !path.file_name().is_some_and(|n| filter.matches(n)) {
                continue;
            }
            out.push(path);
        }

        out.sort();
        Ok(out)
    }

    fn read(&self, path: &Utf8Path) -> EditResult<String> {
        seedfix_edit::read_document(path)
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> EditResult<()> {
        seedfix_edit::write_atomic(path, contents)
    }

    fn write_backup(
        &self,
        path: &Utf8Path,
        original: &str,
        suffix: &str,
    ) -> EditResult<Utf8PathBuf> {
        seedfix_edit::write_backup(path, original, suffix)
    }
}

/// In-memory document store for embedding and testing.
///
/// Paths can be marked unreadable or read-only to exercise document-scoped failures.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: RefCell<BTreeMap<Utf8PathBuf, String>>,
    unreadable: BTreeSet<Utf8PathBuf>,
    read_only: BTreeSet<Utf8PathBuf>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    /// Reads of `path` fail.
    pub fn unreadable(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    /// Writes to `path` fail. Mark `<path><suffix>` to make its backup fail.
    pub fn read_only(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.read_only.insert(path.into());
        self
    }

    pub fn get(&self, path: &Utf8Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<Utf8PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    fn is_read_only(&self, path: &Utf8Path) -> bool {
        self.read_only.contains(path)
    }
}

impl FileStore for InMemoryFileStore {
    fn list_candidates(
        &self,
        dir: &Utf8Path,
        filter: &CandidateFilter,
    ) -> anyhow::Result<Vec<Utf8PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter(|p| p.file_name().is_some_and(|n| filter.matches(n)))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Utf8Path) -> EditResult<String> {
        let missing = || EditError::Read {
            path: path.to_owned(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such document"),
        };
        if self.unreadable.contains(path) {
            return Err(EditError::Read {
                path: path.to_owned(),
                source: io::Error::new(io::ErrorKind::InvalidData, "unreadable document"),
            });
        }
        self.files.borrow().get(path).cloned().ok_or_else(missing)
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> EditResult<()> {
        if self.is_read_only(path) {
            return Err(EditError::Write {
                path: path.to_owned(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only document"),
            });
        }
        self.files
            .borrow_mut()
            .insert(path.to_owned(), contents.to_string());
        Ok(())
    }

    fn write_backup(
        &self,
        path: &Utf8Path,
        original: &str,
        suffix: &str,
    ) -> EditResult<Utf8PathBuf> {
        let backup = backup_path(path, suffix);
        if self.is_read_only(&backup) {
            return Err(EditError::Backup {
                path: backup,
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only document"),
            });
        }
        self.files
            .borrow_mut()
            .insert(backup.clone(), original.to_string());
        Ok(backup)
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        std::fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8")
    }

    #[test]
    fn fs_lists_only_matching_files_sorted() {
        let temp = TempDir::new().expect("temp dir");
        let dir = utf8_root(&temp);
        for name in [
            "seed-zeta-topic.js",
            "seed-alpha-topic.js",
            "seed-alpha-topic.js.backup",
            "helper.js",
            "seed-beta-topic.ts",
        ] {
            std::fs::write(dir.join(name), "x").expect("write");
        }
        std::fs::create_dir(dir.join("seed-dir.js")).expect("mkdir");

        let found = FsFileStore
            .list_candidates(&dir, &CandidateFilter::new("seed-", ".js"))
            .expect("list");
        let names: Vec<&str> = found.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["seed-alpha-topic.js", "seed-zeta-topic.js"]);
    }

    #[test]
    fn fs_missing_dir_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let dir = utf8_root(&temp).join("missing");
        let err = FsFileStore
            .list_candidates(&dir, &CandidateFilter::new("seed-", ".js"))
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn fs_prefix_with_glob_chars_is_literal() {
        let temp = TempDir::new().expect("temp dir");
        let dir = utf8_root(&temp);
        std::fs::write(dir.join("[x]-a.js"), "x").expect("write");
        std::fs::write(dir.join("x-a.js"), "x").expect("write");
        let found = FsFileStore
            .list_candidates(&dir, &CandidateFilter::new("[x]-", ".js"))
            .expect("list");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name(), Some("[x]-a.js"));
    }

    #[test]
    fn in_memory_lists_direct_children_only() {
        let store = InMemoryFileStore::new()
            .with_file("topics/seed-b.js", "b")
            .with_file("topics/seed-a.js", "a")
            .with_file("topics/nested/seed-c.js", "c")
            .with_file("other/seed-d.js", "d");
        let found = store
            .list_candidates(Utf8Path::new("topics"), &CandidateFilter::new("seed-", ".js"))
            .expect("list");
        assert_eq!(
            found,
            vec![
                Utf8PathBuf::from("topics/seed-a.js"),
                Utf8PathBuf::from("topics/seed-b.js"),
            ]
        );
    }

    #[test]
    fn in_memory_failure_injection() {
        let store = InMemoryFileStore::new()
            .with_file("t/seed-a.js", "a")
            .unreadable("t/seed-a.js")
            .read_only("t/seed-b.js")
            .read_only("t/seed-c.js.backup");
        assert!(matches!(
            store.read(Utf8Path::new("t/seed-a.js")),
            Err(EditError::Read { .. })
        ));
        assert!(matches!(
            store.write(Utf8Path::new("t/seed-b.js"), "x"),
            Err(EditError::Write { .. })
        ));
        assert!(matches!(
            store.write_backup(Utf8Path::new("t/seed-c.js"), "x", ".backup"),
            Err(EditError::Backup { .. })
        ));
        assert!(
            store
                .write_backup(Utf8Path::new("t/seed-b.js"), "x", ".backup")
                .is_ok()
        );
    }

    #[test]
    fn fs_write_port_writes_and_creates_dirs() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_root(&temp);
        let target = root.join("out").join("report.json");

        FsWritePort.write_file(&target, b"{}").expect("write");
        assert_eq!(std::fs::read_to_string(&target).expect("read"), "{}");

        let extra = root.join("extra");
        FsWritePort.create_dir_all(&extra).expect("mkdir");
        assert!(extra.exists());
    }
}
