//! Backup Writer: keeps a verbatim copy of each document before it can be replaced.

use crate::ports::FileStore;
use camino::{Utf8Path, Utf8PathBuf};
use seedfix_edit::EditResult;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupWriter {
    enabled: bool,
    suffix: String,
}

impl BackupWriter {
    pub fn new(enabled: bool, suffix: impl Into<String>) -> Self {
        Self {
            enabled,
            suffix: suffix.into(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(false, String::new())
    }

    /// Copy `original` next to `path`. Returns the backup location, or `None` when disabled.
    pub fn save(
        &self,
        store: &dyn FileStore,
        path: &Utf8Path,
        original: &str,
    ) -> EditResult<Option<Utf8PathBuf>> {
        if !self.enabled {
            debug!(path = %path, "backups disabled");
            return Ok(None);
        }
        store
            .write_backup(path, original, &self.suffix)
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryFileStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn saves_verbatim_copy() {
        let store = InMemoryFileStore::new().with_file("t/seed-a.js", "orig\r\n");
        let writer = BackupWriter::new(true, ".backup");
        let backup = writer
            .save(&store, Utf8Path::new("t/seed-a.js"), "orig\r\n")
            .expect("backup");
        assert_eq!(backup, Some(Utf8PathBuf::from("t/seed-a.js.backup")));
        assert_eq!(
            store.get(Utf8Path::new("t/seed-a.js.backup")).as_deref(),
            Some("orig\r\n")
        );
    }

    #[test]
    fn disabled_writer_touches_nothing() {
        let store = InMemoryFileStore::new().with_file("t/seed-a.js", "orig");
        let backup = BackupWriter::disabled()
            .save(&store, Utf8Path::new("t/seed-a.js"), "orig")
            .expect("backup");
        assert_eq!(backup, None);
        assert_eq!(store.paths(), vec![Utf8PathBuf::from("t/seed-a.js")]);
    }
}
