//! File inventory built from an external lister subprocess.
//!
//! The lister (by default `rg --files`) runs once in the repository root and
//! prints one relative path per line. Whatever it excludes (ignored files,
//! etc.) stays excluded; this module is a pass-through. A spawn failure or a
//! non-zero exit aborts the whole run before any output is written.

use crate::error::{AuditError, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::process::Command;

#[derive(Debug)]
/// Snapshot of tracked files plus a basename index for ambiguity detection.
/// Built once per run; read-only afterward.
pub struct Inventory {
    pub files: BTreeSet<String>,
    pub by_basename: HashMap<String, Vec<String>>,
    /// Rendered command line, echoed into the report summary.
    pub command_line: String,
}

impl Inventory {
    /// Index a list of relative paths, preserving lister order within each
    /// basename bucket.
    pub fn from_paths<I, S>(paths: I, command_line: &str) -> Inventory
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: BTreeSet<String> = BTreeSet::new();
        let mut by_basename: HashMap<String, Vec<String>> = HashMap::new();
        for p in paths {
            let p: String = p.into();
            if p.is_empty() {
                continue;
            }
            let base = basename(&p).to_string();
            if files.insert(p.clone()) {
                by_basename.entry(base).or_default().push(p);
            }
        }
        Inventory {
            files,
            by_basename,
            command_line: command_line.to_string(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    /// All inventory paths whose final segment equals `base`.
    pub fn basename_matches(&self, base: &str) -> &[String] {
        self.by_basename
            .get(base)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Final path segment of a `/`-separated relative path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Run the configured lister in `repo_root` and collect its output.
pub fn build(repo_root: &Path, command: &str, args: &[String]) -> Result<Inventory> {
    let command_line = render_command_line(command, args);
    let out = Command::new(command)
        .args(args)
        .current_dir(repo_root)
        .output()
        .map_err(|e| AuditError::InventoryListingFailed {
            command: command_line.clone(),
            detail: e.to_string(),
        })?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(AuditError::InventoryListingFailed {
            command: command_line,
            detail: format!(
                "exit status {}: {}",
                out.status.code().unwrap_or(-1),
                stderr.trim()
            ),
        });
    }
    let stdout = String::from_utf8_lossy(&out.stdout);
    let paths = stdout
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    Ok(Inventory::from_paths(paths, &command_line))
}

fn render_command_line(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}
