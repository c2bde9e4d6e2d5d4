//! CLI argument parsing via `clap`.

use crate::extract::Strategy;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "refaudit",
    version,
    about = "Refaudit (Rust + Markdown)",
    long_about = "Refaudit — a tiny, fast CLI that cross-checks a bug report's file references against the live repository snapshot.\n\nConfiguration precedence: CLI > refaudit.toml > defaults.",
    after_help = "Examples:\n  refaudit validate\n  refaudit validate --input BUG_REPORT.md --threshold 0.1\n  refaudit validate --strategy table --format json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current refaudit version."
    )]
    Version,
    /// Validate a bug report against the repository snapshot
    #[command(
        about = "Validate a bug report",
        long_about = "Resolve every file reference in the report against the file inventory, write an annotated validated report, and gate on the mismatch ratio.",
        after_help = "Exit codes:\n  0  pass (mismatch ratio <= threshold)\n  1  input report not found\n  2  audit failed (ratio > threshold) or inventory listing failed"
    )]
    Validate {
        #[arg(long, help = "Repository root (default: walk up from current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Source report path, relative to the repo root (default: BUG_REPORT.md)")]
        input: Option<String>,
        #[arg(long, help = "Validated report path, relative to the repo root (default: BUG_REPORT_VALIDATED.md)")]
        output: Option<String>,
        #[arg(long, help = "Max tolerated mismatch ratio (default: 0.05)")]
        threshold: Option<f64>,
        #[arg(long, value_enum, help = "Extraction strategy: text|table (default: text)")]
        strategy: Option<Strategy>,
        #[arg(long, help = "Console output mode: human|json (default: human)")]
        format: Option<String>,
    },
}
