//! Rendering helpers (console text and markdown) for human-readable run summaries.

use seedfix_types::{ChangeRecord, DocumentStatus, SeedfixReport};

/// One line per document plus a totals line, for the terminal.
pub fn render_run_text(report: &SeedfixReport) -> String {
    let mut out = String::new();
    for rec in &report.documents {
        out.push_str(&format!(
            "{}: {} ({})",
            rec.path,
            status_label(&rec.status),
            variant_label(rec)
        ));
        if !rec.fired.is_empty() {
            let ids: Vec<&str> = rec.fired.iter().map(|r| r.as_str()).collect();
            out.push_str(&format!(" {}", ids.join(", ")));
        }
        out.push('\n');

        for a in &rec.attention {
            out.push_str(&format!(
                "  attention [{}] {}: {}\n",
                a.kind.token(),
                a.rule_id,
                a.message
            ));
        }
        if let Some(msg) = &rec.message {
            out.push_str(&format!("  {}\n", msg));
        }
    }

    let s = &report.summary;
    out.push_str(&format!(
        "examined {}, changed {}, unchanged {}, failed {}, attention {}\n",
        s.examined, s.changed, s.unchanged, s.failed, s.attention
    ));
    if report.run.dry_run {
        out.push_str("dry run: no files were written\n");
    }
    out
}

pub fn render_run_md(report: &SeedfixReport) -> String {
    let mut out = String::new();
    out.push_str("# seedfix run\n\n");
    let s = &report.summary;
    out.push_str(&format!(
        "- Examined: {}\n- Changed: {}\n- Unchanged: {}\n- Failed: {}\n- Needs attention: {}\n",
        s.examined, s.changed, s.unchanged, s.failed, s.attention
    ));
    out.push_str(&format!("- Dry run: `{}`\n\n", report.run.dry_run));

    out.push_str("## Documents\n\n");
    if report.documents.is_empty() {
        out.push_str("_No documents matched._\n");
        return out;
    }

    for (i, rec) in report.documents.iter().enumerate() {
        out.push_str(&format!("### {}. `{}`\n\n", i + 1, rec.path));
        out.push_str(&format!("- Status: `{}`\n", status_label(&rec.status)));
        out.push_str(&format!("- Variant: `{}`\n", variant_label(rec)));
        if !rec.fired.is_empty() {
            let ids: Vec<String> = rec.fired.iter().map(|r| format!("`{r}`")).collect();
            out.push_str(&format!("- Rules fired: {}\n", ids.join(", ")));
        }
        if let Some(backup) = &rec.backup_path {
            out.push_str(&format!("- Backup: `{}`\n", backup));
        }
        if let (Some(before), Some(after)) = (&rec.sha256_before, &rec.sha256_after)
            && before != after
        {
            out.push_str(&format!("- sha256: {} → {}\n", short_sha(before), short_sha(after)));
        }
        if let Some(msg) = &rec.message {
            out.push_str(&format!("- Message: {}\n", msg));
        }

        if !rec.attention.is_empty() {
            out.push_str("\n**Needs attention**\n\n");
            for a in &rec.attention {
                out.push_str(&format!(
                    "- `{}` `{}`: {}\n",
                    a.rule_id,
                    a.kind.token(),
                    a.message
                ));
            }
        }
        out.push('\n');
    }

    out
}

fn status_label(s: &DocumentStatus) -> &'static str {
    match s {
        DocumentStatus::Written => "written",
        DocumentStatus::Unchanged => "unchanged",
        DocumentStatus::WouldWrite => "would write",
        DocumentStatus::Failed => "failed",
    }
}

fn variant_label(rec: &ChangeRecord) -> &'static str {
    rec.variant.map(|v| v.as_str()).unwrap_or("-")
}

fn short_sha(sha: &str) -> &str {
    sha.get(..12).unwrap_or(sha)
}
