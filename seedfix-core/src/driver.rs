//! Transformation Driver: runs one document through
//! load, classify, back up, rewrite, compare, write.

use crate::backup::BackupWriter;
use crate::ports::FileStore;
use camino::Utf8Path;
use seedfix_domain::{RuleSet, classify};
use seedfix_edit::{EditError, sha256_hex};
use seedfix_types::{ChangeRecord, DocumentStatus};
use tracing::{debug, info, warn};

/// Result of one driver invocation.
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub record: ChangeRecord,
    /// Original and rewritten text, present only when the rewrite changed the document.
    pub change: Option<(String, String)>,
}

pub struct Driver<'a> {
    rules: &'a RuleSet,
    backups: &'a BackupWriter,
    root: &'a Utf8Path,
    dry_run: bool,
}

impl<'a> Driver<'a> {
    pub fn new(
        rules: &'a RuleSet,
        backups: &'a BackupWriter,
        root: &'a Utf8Path,
        dry_run: bool,
    ) -> Self {
        Self {
            rules,
            backups,
            root,
            dry_run,
        }
    }

    /// Process one document. Never fails: every error ends up in the returned record.
    pub fn process(&self, store: &dyn FileStore, path: &Utf8Path) -> DocumentOutcome {
        let shown = display_path(self.root, path);

        let original = match store.read(path) {
            Ok(text) => text,
            Err(e) => {
                let message = e.to_string();
                return failed(ChangeRecord::failed(shown, message), e);
            }
        };

        let variant = classify(&original);
        debug!(path = %shown, variant = %variant, "classified");

        let sha_before = sha256_hex(original.as_bytes());
        let mut record = ChangeRecord::new(shown.clone(), DocumentStatus::Unchanged);
        record.variant = Some(variant);
        record.sha256_before = Some(sha_before.clone());

        if !self.dry_run {
            match self.backups.save(store, path, &original) {
                Ok(backup) => {
                    record.backup_path = backup.map(|b| display_path(self.root, &b));
                }
                Err(e) => return failed(record, e),
            }
        }

        let rewrite = self.rules.apply(&original, variant);
        record.fired = rewrite.fired;
        record.attention = rewrite.attention;
        for a in &record.attention {
            warn!(path = %shown, rule = %a.rule_id, kind = a.kind.token(), "{}", a.message);
        }

        if rewrite.text == original {
            debug!(path = %shown, "unchanged");
            record.sha256_after = Some(sha_before);
            return DocumentOutcome {
                record,
                change: None,
            };
        }
        record.sha256_after = Some(sha256_hex(rewrite.text.as_bytes()));

        if self.dry_run {
            record.status = DocumentStatus::WouldWrite;
        } else {
            if let Err(e) = store.write(path, &rewrite.text) {
                return failed(record, e);
            }
            record.status = DocumentStatus::Written;
            info!(path = %shown, rules = record.fired.len(), "document rewritten");
        }

        DocumentOutcome {
            record,
            change: Some((original, rewrite.text)),
        }
    }
}

fn failed(mut record: ChangeRecord, err: EditError) -> DocumentOutcome {
    warn!(
        path = %err.path(),
        stage = err.stage(),
        error = %err,
        "document skipped"
    );
    record.status = DocumentStatus::Failed;
    record.message = Some(err.to_string());
    DocumentOutcome {
        record,
        change: None,
    }
}

/// `path` relative to `root` when possible, with `/` separators.
pub fn display_path(root: &Utf8Path, path: &Utf8Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .as_str()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryFileStore;
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;
    use seedfix_types::{AttentionKind, Variant};

    const NESTED: &str = "for (const [mainKey, mainValue] of Object.entries(pythonData)) {\n    group: await assignGroup(k, 'python'),\n}\n";
    const FLAT_NO_SLUG: &str = "let order = 1;\nfor (const [key, value] of Object.entries(pythonData)) {\n    group: await assignGroup(k, s),\n}\n";

    fn run(store: &InMemoryFileStore, path: &str, dry_run: bool) -> DocumentOutcome {
        let rules = RuleSet::new();
        let backups = BackupWriter::new(true, ".backup");
        Driver::new(&rules, &backups, Utf8Path::new("root"), dry_run)
            .process(store, Utf8Path::new(path))
    }

    #[test]
    fn rewrites_and_backs_up_original() {
        let store = InMemoryFileStore::new().with_file("root/t/seed-a.js", NESTED);
        let out = run(&store, "root/t/seed-a.js", false);

        assert_eq!(out.record.path, "t/seed-a.js");
        assert_eq!(out.record.status, DocumentStatus::Written);
        assert_eq!(out.record.variant, Some(Variant::Nested));
        assert_eq!(out.record.backup_path.as_deref(), Some("t/seed-a.js.backup"));
        assert_eq!(
            store.get(Utf8Path::new("root/t/seed-a.js.backup")).as_deref(),
            Some(NESTED)
        );
        let written = store.get(Utf8Path::new("root/t/seed-a.js")).expect("doc");
        assert!(written.contains("group: groupName,"));
        assert_ne!(out.record.sha256_before, out.record.sha256_after);
    }

    #[test]
    fn unchanged_document_is_backed_up_but_not_written() {
        let store = InMemoryFileStore::new()
            .with_file("root/t/seed-a.js", FLAT_NO_SLUG)
            .read_only("root/t/seed-a.js");
        let out = run(&store, "root/t/seed-a.js", false);

        assert_eq!(out.record.status, DocumentStatus::Unchanged);
        assert_eq!(out.record.attention[0].kind, AttentionKind::MissingSlug);
        assert!(out.change.is_none());
        assert_eq!(out.record.sha256_before, out.record.sha256_after);
        assert!(store.get(Utf8Path::new("root/t/seed-a.js.backup")).is_some());
    }

    #[test]
    fn dry_run_neither_backs_up_nor_writes() {
        let store = InMemoryFileStore::new().with_file("root/t/seed-a.js", NESTED);
        let out = run(&store, "root/t/seed-a.js", true);

        assert_eq!(out.record.status, DocumentStatus::WouldWrite);
        assert!(out.record.backup_path.is_none());
        assert_eq!(store.paths(), vec![Utf8PathBuf::from("root/t/seed-a.js")]);
        assert_eq!(
            store.get(Utf8Path::new("root/t/seed-a.js")).as_deref(),
            Some(NESTED)
        );
        let (before, after) = out.change.expect("change");
        assert_eq!(before, NESTED);
        assert!(after.contains("const groupName = formatName(mainKey);"));
    }

    #[test]
    fn unreadable_document_fails_without_side_effects() {
        let store = InMemoryFileStore::new()
            .with_file("root/t/seed-a.js", NESTED)
            .unreadable("root/t/seed-a.js");
        let out = run(&store, "root/t/seed-a.js", false);

        assert_eq!(out.record.status, DocumentStatus::Failed);
        assert_eq!(out.record.variant, None);
        assert!(out.record.message.as_deref().unwrap_or("").starts_with("read "));
        assert_eq!(store.paths().len(), 1);
    }

    #[test]
    fn failed_backup_leaves_document_untouched() {
        let store = InMemoryFileStore::new()
            .with_file("root/t/seed-a.js", NESTED)
            .read_only("root/t/seed-a.js.backup");
        let out = run(&store, "root/t/seed-a.js", false);

        assert_eq!(out.record.status, DocumentStatus::Failed);
        assert!(out.record.fired.is_empty());
        assert_eq!(
            store.get(Utf8Path::new("root/t/seed-a.js")).as_deref(),
            Some(NESTED)
        );
    }

    #[test]
    fn failed_write_keeps_fired_rules_for_the_report() {
        let store = InMemoryFileStore::new()
            .with_file("root/t/seed-a.js", NESTED)
            .read_only("root/t/seed-a.js");
        let out = run(&store, "root/t/seed-a.js", false);

        assert_eq!(out.record.status, DocumentStatus::Failed);
        assert_eq!(out.record.fired.len(), 2);
        assert_eq!(out.record.backup_path.as_deref(), Some("t/seed-a.js.backup"));
        assert!(out.record.message.as_deref().unwrap_or("").starts_with("write "));
        assert!(out.change.is_none());
        assert_eq!(
            store.get(Utf8Path::new("root/t/seed-a.js")).as_deref(),
            Some(NESTED)
        );
    }

    #[test]
    fn display_path_strips_root() {
        assert_eq!(
            display_path(Utf8Path::new("."), Utf8Path::new("./src/seeds/topics/seed-a.js")),
            "src/seeds/topics/seed-a.js"
        );
        assert_eq!(
            display_path(Utf8Path::new("/elsewhere"), Utf8Path::new("/x/seed-a.js")),
            "/x/seed-a.js"
        );
    }
}
