//! Error taxonomy for the audit run.
//!
//! Only two failures are fatal: a missing input report and a failed file
//! inventory listing. Per-reference resolution failures are never errors;
//! they become mismatch records in the result.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("input report not found: {0}")]
    InputNotFound(PathBuf),

    #[error("file inventory listing failed: `{command}`: {detail}")]
    InventoryListingFailed { command: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// Process exit code for a fatal error. A missing input report exits 1;
    /// everything else exits 2, matching the audit-gate failure code.
    pub fn exit_code(&self) -> i32 {
        match self {
            AuditError::InputNotFound(_) => 1,
            _ => 2,
        }
    }
}
