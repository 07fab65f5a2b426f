//! Batch Runner: enumerate candidates, drive each document, assemble the report.
//!
//! These entry points are I/O-agnostic: all filesystem operations are performed through the port
//! traits.

use crate::backup::BackupWriter;
use crate::driver::{Driver, display_path};
use crate::ports::{FileStore, WritePort};
use crate::settings::RunSettings;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use seedfix_domain::{RuleSet, classify};
use seedfix_edit::render_patch;
use seedfix_render::render_run_md;
use seedfix_types::{SeedfixReport, ToolInfo, Variant};
use tracing::{debug, info};

/// Error type for pipeline results. Exit code 2 = attention required (strict mode), 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("documents need manual attention")]
    AttentionRequired,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::AttentionRequired => 2,
            ToolError::Internal(_) => 1,
        }
    }
}

/// Outcome of `run_batch`.
pub struct RunOutcome {
    pub report: SeedfixReport,
    /// Unified diff of every changed document, in processing order.
    pub patch: String,
}

impl RunOutcome {
    pub fn needs_attention(&self) -> bool {
        self.report.needs_attention()
    }
}

/// Rewrite every candidate document. Document failures are recorded, never returned.
///
/// Only failing to enumerate candidates aborts the batch.
pub fn run_batch(
    settings: &RunSettings,
    store: &dyn FileStore,
    rules: &RuleSet,
    tool: ToolInfo,
) -> Result<RunOutcome, ToolError> {
    let candidates = candidates(settings, store)?;
    info!(count = candidates.len(), dry_run = settings.dry_run, "processing documents");

    let backups = if settings.backups_active() {
        BackupWriter::new(true, settings.backup_suffix.clone())
    } else {
        BackupWriter::disabled()
    };
    let driver = Driver::new(rules, &backups, &settings.root, settings.dry_run);

    let mut report = SeedfixReport::new(tool, settings.root.to_string(), settings.dry_run);
    let mut patch = String::new();
    for path in &candidates {
        let outcome = driver.process(store, path);
        if let Some((before, after)) = &outcome.change {
            patch.push_str(&render_patch(&outcome.record.path, before, after));
        }
        report.push(outcome.record);
    }
    report.finish();

    let s = &report.summary;
    info!(
        examined = s.examined,
        changed = s.changed,
        failed = s.failed,
        attention = s.attention,
        "batch complete"
    );

    Ok(RunOutcome { report, patch })
}

/// A document's detected variant, or why it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub path: String,
    pub variant: Result<Variant, String>,
}

/// Classify every candidate without backing up or writing anything.
pub fn classify_documents(
    settings: &RunSettings,
    store: &dyn FileStore,
) -> Result<Vec<Classified>, ToolError> {
    let candidates = candidates(settings, store)?;
    Ok(candidates
        .iter()
        .map(|path| Classified {
            path: display_path(&settings.root, path),
            variant: store
                .read(path)
                .map(|text| classify(&text))
                .map_err(|e| e.to_string()),
        })
        .collect())
}

/// Explicit files when given, otherwise discovery under `settings.search_dir()`.
pub fn candidates(settings: &RunSettings, store: &dyn FileStore) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !settings.files.is_empty() {
        let mut files: Vec<Utf8PathBuf> = settings
            .files
            .iter()
            .map(|f| resolve(&settings.root, f))
            .collect();
        files.sort();
        files.dedup();
        debug!(count = files.len(), "using explicit documents");
        return Ok(files);
    }

    let dir = settings.search_dir();
    store
        .list_candidates(&dir, &settings.filter())
        .with_context(|| format!("list candidates in {dir}"))
}

fn resolve(root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_owned()
    } else {
        root.join(path)
    }
}

/// Write the optional JSON report, markdown summary and patch artifacts.
pub fn write_report_artifacts(
    outcome: &RunOutcome,
    report_path: Option<&Utf8Path>,
    markdown_path: Option<&Utf8Path>,
    patch_path: Option<&Utf8Path>,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
        writer.write_file(path, json.as_bytes())?;
    }
    if let Some(path) = markdown_path {
        let md = render_run_md(&outcome.report);
        writer.write_file(path, md.as_bytes())?;
    }
    if let Some(path) = patch_path {
        writer.write_file(path, outcome.patch.as_bytes())?;
    }
    Ok(())
}
