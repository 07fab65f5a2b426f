use crate::record::{ChangeRecord, RunSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub dry_run: bool,
}

/// Report for one batch run, written as `seedfix.report.v1` JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedfixReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub root: String,
    pub summary: RunSummary,

    #[serde(default)]
    pub documents: Vec<ChangeRecord>,
}

impl SeedfixReport {
    pub fn new(tool: ToolInfo, root: impl Into<String>, dry_run: bool) -> Self {
        Self {
            schema: crate::schema::SEEDFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo {
                started_at: Some(Utc::now()),
                ended_at: None,
                dry_run,
            },
            root: root.into(),
            summary: RunSummary::default(),
            documents: vec![],
        }
    }

    /// Append a document outcome and fold it into the summary.
    pub fn push(&mut self, rec: ChangeRecord) {
        self.summary.record(&rec);
        self.documents.push(rec);
    }

    pub fn finish(&mut self) {
        self.run.ended_at = Some(Utc::now());
    }

    pub fn needs_attention(&self) -> bool {
        self.summary.attention > 0 || self.summary.failed > 0
    }
}
