//! Edit engine: everything that touches a document's bytes on disk.
//!
//! - Read a document as UTF-8.
//! - Copy the original next to itself before it is replaced.
//! - Persist rewritten text atomically (temp file in the same directory, then rename).
//! - Render unified diffs and sha256 digests for reports.

mod error;

pub use error::{EditError, EditResult};

use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use sha2::{Digest, Sha256};
use std::io::{self, Write};
use tracing::debug;

pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

pub fn read_document(path: &Utf8Path) -> EditResult<String> {
    fs::read_to_string(path).map_err(|source| EditError::Read {
        path: path.to_owned(),
        source,
    })
}

/// `<path><suffix>`, e.g. `seed-python-topic.js.backup`.
pub fn backup_path(path: &Utf8Path, suffix: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{path}{suffix}"))
}

/// Write `original` to the backup path for `path`, replacing any previous backup.
pub fn write_backup(path: &Utf8Path, original: &str, suffix: &str) -> EditResult<Utf8PathBuf> {
    let backup = backup_path(path, suffix);
    fs::write(&backup, original).map_err(|source| EditError::Backup {
        path: backup.clone(),
        source,
    })?;
    debug!(path = %path, backup = %backup, "backup written");
    Ok(backup)
}

/// Replace `path` with `contents` so readers see either the old or the new file, never a mix.
///
/// Existing permissions are carried over to the new file.
pub fn write_atomic(path: &Utf8Path, contents: &str) -> EditResult<()> {
    let err = |source: io::Error| EditError::Write {
        path: path.to_owned(),
        source,
    };
    let parent = match path.parent() {
        Some(p) if !p.as_str().is_empty() => p,
        _ => Utf8Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(err)?;
    tmp.write_all(contents.as_bytes()).map_err(err)?;
    tmp.flush().map_err(err)?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(err)?;
    }
    tmp.as_file().sync_all().map_err(err)?;
    tmp.persist(path).map_err(|e| err(e.error))?;

    debug!(path = %path, bytes = contents.len(), "document written");
    Ok(())
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Unified diff for one document, with `a/` and `b/` headers. Empty when nothing changed.
pub fn render_patch(path: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    let formatted = PatchFormatter::new().fmt_patch(&patch).to_string();
    // diffy writes its own original/modified header; keep only the hunks.
    for line in formatted
        .split_inclusive('\n')
        .skip_while(|l| l.starts_with("--- ") || l.starts_with("+++ "))
    {
        out.push_str(line);
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
