//! Filesystem behavior of the edit primitives, exercised in temp directories.

use camino::{Utf8Path, Utf8PathBuf};
use pretty_assertions::assert_eq;
use seedfix_edit::{
    DEFAULT_BACKUP_SUFFIX, EditError, read_document, sha256_hex, write_atomic, write_backup,
};
use std::fs;
use tempfile::TempDir;

fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir")
}

#[test]
fn atomic_write_replaces_content() {
    let dir = TempDir::new().unwrap();
    let path = utf8_root(&dir).join("seed-a.js");
    fs::write(&path, "old\n").unwrap();

    write_atomic(&path, "new\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "temp file left behind");
}

#[test]
fn atomic_write_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = utf8_root(&dir).join("seed-new.js");
    write_atomic(&path, "x").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "x");
}

#[test]
fn atomic_write_into_missing_dir_is_write_error() {
    let dir = TempDir::new().unwrap();
    let path = utf8_root(&dir).join("nope").join("seed-a.js");
    let err = write_atomic(&path, "x").unwrap_err();
    assert!(matches!(err, EditError::Write { .. }));
    assert_eq!(err.path(), &path);
}

#[cfg(unix)]
#[test]
fn atomic_write_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = utf8_root(&dir).join("seed-a.js");
    fs::write(&path, "old").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    write_atomic(&path, "new").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}

#[test]
fn backup_is_overwritten_each_time() {
    let dir = TempDir::new().unwrap();
    let path = utf8_root(&dir).join("seed-a.js");

    let first = write_backup(&path, "one", DEFAULT_BACKUP_SUFFIX).unwrap();
    let second = write_backup(&path, "two", DEFAULT_BACKUP_SUFFIX).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.file_name(), Some("seed-a.js.backup"));
    assert_eq!(fs::read_to_string(&second).unwrap(), "two");
}

#[test]
fn backup_failure_names_backup_path() {
    let dir = TempDir::new().unwrap();
    let path = utf8_root(&dir).join("missing-dir").join("seed-a.js");
    let err = write_backup(&path, "x", ".bak").unwrap_err();
    assert_eq!(err.stage(), "backup");
    assert_eq!(err.path().as_str(), format!("{path}.bak"));
}

#[test]
fn read_rejects_non_utf8() {
    let dir = TempDir::new().unwrap();
    let path = utf8_root(&dir).join("seed-bin.js");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    let err = read_document(&path).unwrap_err();
    assert!(matches!(err, EditError::Read { .. }));
}

#[test]
fn read_missing_is_read_error() {
    let err = read_document(Utf8Path::new("/definitely/not/here/seed-a.js")).unwrap_err();
    assert_eq!(err.stage(), "read");
}

#[test]
fn sha_distinguishes_line_endings() {
    assert_ne!(sha256_hex(b"a\n"), sha256_hex(b"a\r\n"));
    assert_eq!(sha256_hex(b"a\n").len(), 64);
}
