//! Markdown rendering of the validated report.
//!
//! Output is deterministic: same findings and summary in, byte-identical
//! document out. Cell text is escaped so a literal `|` cannot break the
//! tables. Empty categories omit their section entirely.

use crate::extract::Strategy;
use crate::models::AuditResult;

/// Render the full validated report document.
pub fn render(
    result: &AuditResult,
    source_name: &str,
    inventory_command: &str,
    strategy: Strategy,
) -> String {
    let s = &result.summary;
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Bug Report — Validated Findings".to_string());
    lines.push(String::new());
    lines.push(format!("- Source report: `{}`", source_name));
    lines.push(format!(
        "- Source file inventory command: `{}`",
        inventory_command
    ));
    lines.push(format!("- Total file references scanned: **{}**", s.total));
    lines.push(format!(
        "- Actionable (resolvable) references: **{}**",
        s.actionable
    ));
    lines.push(format!("- Non-resolvable references: **{}**", s.mismatches));
    lines.push(format!("- Mismatch ratio: **{}**", percent(s.ratio)));
    lines.push(format!("- Threshold: **{}**", percent(s.threshold)));
    lines.push(format!("- Pre-check status: **{}**", s.status));
    lines.push(String::new());

    if !result.findings.is_empty() {
        lines.push("## Actionable Findings (resolved against current tree)".to_string());
        lines.push(String::new());
        match strategy {
            Strategy::Text => {
                lines.push("| Source Line | Original Reference | Resolved Path | Context |".into());
                lines.push("|---:|---|---|---|".into());
                for f in &result.findings {
                    lines.push(format!(
                        "| {} | `{}` | `{}` | {} |",
                        f.line,
                        f.original,
                        f.resolved,
                        escape_cell(&f.context)
                    ));
                }
            }
            Strategy::Table => {
                lines.push("| ID | Original Reference | Resolved Path | Bug | Proposed Fix |".into());
                lines.push("|---|---|---|---|---|".into());
                for f in &result.findings {
                    lines.push(format!(
                        "| {} | `{}` | `{}` | {} | {} |",
                        f.finding_id.as_deref().unwrap_or(""),
                        f.original,
                        f.resolved,
                        escape_cell(f.bug.as_deref().unwrap_or("")),
                        escape_cell(f.fix.as_deref().unwrap_or(""))
                    ));
                }
            }
        }
        lines.push(String::new());
    }

    if !result.mismatches.is_empty() {
        lines.push("## Out-of-Scope Snapshot Mismatches".to_string());
        lines.push(String::new());
        match strategy {
            Strategy::Text => {
                lines.push("| Source Line | Original Reference | Status | Reason |".into());
                lines.push("|---:|---|---|---|".into());
            }
            Strategy::Table => {
                lines.push("| ID | Original Reference | Status | Reason |".into());
                lines.push("|---|---|---|---|".into());
            }
        }
        for m in &result.mismatches {
            let key = match strategy {
                Strategy::Text => m.line.to_string(),
                Strategy::Table => m.finding_id.clone().unwrap_or_default(),
            };
            lines.push(format!(
                "| {} | `{}` | {} | {} |",
                key,
                m.original,
                escape_cell(&m.status),
                escape_cell(&m.reason)
            ));
        }
        lines.push(String::new());
    }

    let mut doc = lines.join("\n");
    doc.push('\n');
    doc
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
