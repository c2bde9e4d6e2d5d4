//! Shared data models for audit results and console/JSON printers.

use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
/// A reference that resolved to exactly one inventory path.
pub struct Finding {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finding_id: Option<String>,
    pub original: String,
    pub resolved: String,
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
/// A reference that could not be uniquely mapped to the snapshot.
pub struct Mismatch {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finding_id: Option<String>,
    pub original: String,
    pub status: String,
    pub reason: String,
}

#[derive(Serialize, Debug, Clone)]
/// Aggregated counts plus the threshold verdict.
pub struct AuditSummary {
    pub total: usize,
    pub actionable: usize,
    pub mismatches: usize,
    pub ratio: f64,
    pub threshold: f64,
    pub status: String,
}

#[derive(Serialize, Debug)]
/// Audit results container.
pub struct AuditResult {
    pub findings: Vec<Finding>,
    pub mismatches: Vec<Mismatch>,
    pub summary: AuditSummary,
}

impl AuditSummary {
    /// Build the summary from the two category counts.
    ///
    /// The ratio is mismatches over total, defined as 0.0 for an empty
    /// report. The boundary `ratio == threshold` passes.
    pub fn compute(actionable: usize, mismatches: usize, threshold: f64) -> AuditSummary {
        let total = actionable + mismatches;
        let ratio = if total == 0 {
            0.0
        } else {
            mismatches as f64 / total as f64
        };
        let status = if ratio <= threshold { "PASS" } else { "FAIL" };
        AuditSummary {
            total,
            actionable,
            mismatches,
            ratio,
            threshold,
            status: status.to_string(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == "PASS"
    }
}
