use crate::rule::RuleId;
use crate::variant::Variant;
use serde::{Deserialize, Serialize};

/// Why a document needs a human to look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionKind {
    /// Flat document with no `slug:` literal to derive a default group from.
    MissingSlug,
    /// Nested document with call-sites to redirect but no place to insert the group binding.
    BindingAnchorMissing,
    /// Flat document with a slug but no `let order = 1;` line to anchor the constant.
    InsertAnchorMissing,
    /// A rule's output still matched the rule; the rewrite was discarded.
    UnstableRewrite,
}

impl AttentionKind {
    pub fn token(self) -> &'static str {
        match self {
            AttentionKind::MissingSlug => "missing_slug",
            AttentionKind::BindingAnchorMissing => "binding_anchor_missing",
            AttentionKind::InsertAnchorMissing => "insert_anchor_missing",
            AttentionKind::UnstableRewrite => "unstable_rewrite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attention {
    pub rule_id: RuleId,
    pub kind: AttentionKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Written,
    Unchanged,
    /// Dry run: the document would have been written.
    WouldWrite,
    Failed,
}

/// Outcome of running the driver over one document. Never persisted except inside a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: String,

    /// `None` when the document could not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,

    pub status: DocumentStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fired: Vec<RuleId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attention: Vec<Attention>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChangeRecord {
    pub fn new(path: impl Into<String>, status: DocumentStatus) -> Self {
        Self {
            path: path.into(),
            variant: None,
            status,
            fired: vec![],
            attention: vec![],
            backup_path: None,
            sha256_before: None,
            sha256_after: None,
            message: None,
        }
    }

    /// A failed record for a document that could not be processed.
    pub fn failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut rec = Self::new(path, DocumentStatus::Failed);
        rec.message = Some(message.into());
        rec
    }

    pub fn changed(&self) -> bool {
        matches!(
            self.status,
            DocumentStatus::Written | DocumentStatus::WouldWrite
        )
    }

    pub fn needs_attention(&self) -> bool {
        !self.attention.is_empty()
    }
}

/// Batch totals accumulated after each driver invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub examined: u64,
    pub changed: u64,
    pub unchanged: u64,
    pub failed: u64,
    pub attention: u64,
}

impl RunSummary {
    pub fn record(&mut self, rec: &ChangeRecord) {
        self.examined += 1;
        match rec.status {
            DocumentStatus::Written | DocumentStatus::WouldWrite => self.changed += 1,
            DocumentStatus::Unchanged => self.unchanged += 1,
            DocumentStatus::Failed => self.failed += 1,
        }
        if rec.needs_attention() {
            self.attention += 1;
        }
    }
}
