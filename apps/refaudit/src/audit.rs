//! The audit run: one linear pass from input report to validated report.
//!
//! Order matters for the error contract: the input check and the inventory
//! listing both happen before anything is written, so a fatal error leaves
//! no partial output. A failed threshold gate still writes the report.

use crate::config::Effective;
use crate::error::{AuditError, Result};
use crate::extract::{self, Reference, Strategy};
use crate::inventory::{self, Inventory};
use crate::models::{AuditResult, AuditSummary, Finding, Mismatch};
use crate::report;
use crate::resolve::{resolve_ref, Resolution};
use std::fs;

const MISMATCH_STATUS: &str = "out-of-scope snapshot mismatch";

/// Run the full audit per the effective configuration and write the
/// validated report to `eff.output` (relative to the repo root).
pub fn run_audit(eff: &Effective) -> Result<AuditResult> {
    let input_path = eff.repo_root.join(&eff.input);
    if !input_path.exists() {
        return Err(AuditError::InputNotFound(input_path));
    }

    let inv = inventory::build(&eff.repo_root, &eff.inventory_command, &eff.inventory_args)?;
    let source = fs::read_to_string(&input_path)?;

    let refs = match eff.strategy {
        Strategy::Text => extract::scan_text(&source, &eff.extensions),
        Strategy::Table => extract::scan_table(&source),
    };

    let result = resolve_all(refs, &inv, eff.threshold);

    let doc = report::render(&result, &eff.input, &inv.command_line, eff.strategy);
    let output_path = eff.repo_root.join(&eff.output);
    fs::write(&output_path, doc)?;

    Ok(result)
}

/// Resolve every extracted reference and aggregate the two categories.
/// Input order is preserved in both lists.
pub fn resolve_all(refs: Vec<Reference>, inv: &Inventory, threshold: f64) -> AuditResult {
    let mut findings: Vec<Finding> = Vec::new();
    let mut mismatches: Vec<Mismatch> = Vec::new();

    for r in refs {
        match resolve_ref(&r.raw, inv) {
            Resolution::Resolved(path) => findings.push(Finding {
                line: r.line,
                finding_id: r.finding_id,
                original: r.raw,
                resolved: path,
                context: r.context,
                bug: r.bug,
                fix: r.fix,
            }),
            other => mismatches.push(Mismatch {
                line: r.line,
                finding_id: r.finding_id,
                original: r.raw,
                status: MISMATCH_STATUS.to_string(),
                reason: other.reason(),
            }),
        }
    }

    let summary = AuditSummary::compute(findings.len(), mismatches.len(), threshold);
    AuditResult {
        findings,
        mismatches,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn effective(root: &std::path::Path, threshold: f64, strategy: Strategy) -> Effective {
        Effective {
            repo_root: root.to_path_buf(),
            input: "BUG_REPORT.md".into(),
            output: "BUG_REPORT_VALIDATED.md".into(),
            threshold,
            strategy,
            format: "human".into(),
            // A fixed lister keeps tests independent of what is on disk
            inventory_command: "sh".into(),
            inventory_args: vec![
                "-c".into(),
                "printf 'a/b.py\\nc/b.py\\nx/y.py\\n'".into(),
            ],
            extensions: vec!["py".into()],
        }
    }

    #[test]
    fn test_snapshot_scenario_counts() {
        let tmp = tempdir().unwrap();
        let report = "touch a/b.py and b.py\nalso y.py plus z.py\n";
        std::fs::write(tmp.path().join("BUG_REPORT.md"), report).unwrap();

        let res = run_audit(&effective(tmp.path(), 0.05, Strategy::Text)).unwrap();
        assert_eq!(res.summary.total, 4);
        assert_eq!(res.summary.actionable, 2);
        assert_eq!(res.summary.mismatches, 2);
        assert!((res.summary.ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(res.summary.status, "FAIL");
        assert!(tmp.path().join("BUG_REPORT_VALIDATED.md").exists());

        let ambiguous = res.mismatches.iter().find(|m| m.original == "b.py").unwrap();
        assert_eq!(ambiguous.reason, "ambiguous basename (2 matches)");
        let resolved = res.findings.iter().find(|f| f.original == "y.py").unwrap();
        assert_eq!(resolved.resolved, "x/y.py");
    }

    #[test]
    fn test_empty_report_passes() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("BUG_REPORT.md"), "").unwrap();
        let res = run_audit(&effective(tmp.path(), 0.05, Strategy::Text)).unwrap();
        assert_eq!(res.summary.total, 0);
        assert_eq!(res.summary.ratio, 0.0);
        assert!(res.summary.passed());
    }

    #[test]
    fn test_missing_input_reports_exit_code_one() {
        let tmp = tempdir().unwrap();
        let err = run_audit(&effective(tmp.path(), 0.05, Strategy::Text)).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(!tmp.path().join("BUG_REPORT_VALIDATED.md").exists());
    }

    #[test]
    fn test_inventory_failure_writes_nothing() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("BUG_REPORT.md"), "see a/b.py").unwrap();
        let mut eff = effective(tmp.path(), 0.05, Strategy::Text);
        eff.inventory_args = vec!["-c".into(), "exit 1".into()];
        let err = run_audit(&eff).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!tmp.path().join("BUG_REPORT_VALIDATED.md").exists());
    }

    #[test]
    fn test_reruns_are_byte_identical() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("BUG_REPORT.md"), "a/b.py and z.py\n").unwrap();
        let eff = effective(tmp.path(), 0.5, Strategy::Text);
        run_audit(&eff).unwrap();
        let first = std::fs::read(tmp.path().join("BUG_REPORT_VALIDATED.md")).unwrap();
        run_audit(&eff).unwrap();
        let second = std::fs::read(tmp.path().join("BUG_REPORT_VALIDATED.md")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tabular_strategy_end_to_end() {
        let tmp = tempdir().unwrap();
        let report = "\
| ID | File | Bug | Fix |
|---|---|---|---|
| B1 | `a/b.py` | stale lock | drop it |
| B2 | `gone/thing.py` | crash | rewrite |
| B3 |  | unclear | n/a |
";
        std::fs::write(tmp.path().join("BUG_REPORT.md"), report).unwrap();
        let res = run_audit(&effective(tmp.path(), 0.05, Strategy::Table)).unwrap();
        assert_eq!(res.summary.total, 3);
        assert_eq!(res.summary.actionable, 1);
        assert_eq!(res.findings[0].finding_id.as_deref(), Some("B1"));
        let empty = res.mismatches.iter().find(|m| m.original.is_empty()).unwrap();
        assert_eq!(empty.reason, "empty path reference");
        let gone = res
            .mismatches
            .iter()
            .find(|m| m.original == "gone/thing.py")
            .unwrap();
        assert_eq!(gone.reason, "missing from current snapshot");
        assert_eq!(gone.status, "out-of-scope snapshot mismatch");
    }
}
