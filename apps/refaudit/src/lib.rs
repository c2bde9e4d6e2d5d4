//! Refaudit core library.
//!
//! This crate exposes programmatic APIs for cross-checking a bug report's
//! file references against a live repository snapshot and regenerating the
//! report with resolution annotations.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `inventory`: File inventory built from the external lister subprocess.
//! - `extract`: Free-text and tabular reference extraction.
//! - `resolve`: Shared reference resolution against the inventory.
//! - `audit`: The linear validate run tying the pieces together.
//! - `models`: Data models for findings, mismatches, and the summary.
//! - `report`: Deterministic Markdown rendering of the validated report.
//! - `output`: Human/JSON console printers.
//! - `error`: Fatal error taxonomy and exit codes.
//! - `utils`: Supporting helpers.
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod inventory;
pub mod models;
pub mod output;
pub mod report;
pub mod resolve;
pub mod utils;
