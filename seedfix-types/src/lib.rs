//! Shared DTOs (schemas-as-code) for the seedfix workspace.
//!
//! # Design constraints
//! - These types are serialized into run reports.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod record;
pub mod report;
pub mod rule;
pub mod variant;

pub use record::{Attention, AttentionKind, ChangeRecord, DocumentStatus, RunSummary};
pub use report::{SeedfixReport, ToolInfo};
pub use rule::RuleId;
pub use variant::Variant;

/// Schema identifiers.
pub mod schema {
    pub const SEEDFIX_REPORT_V1: &str = "seedfix.report.v1";
}
