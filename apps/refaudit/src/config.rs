//! Configuration discovery and effective settings resolution.
//!
//! Refaudit reads `refaudit.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags.
//! Defaults:
//! - `input`: `BUG_REPORT.md`
//! - `output`: `BUG_REPORT_VALIDATED.md`
//! - `threshold`: `0.05`
//! - `strategy`: `text`
//! - `format`: `human`
//! - `[inventory]`: `rg --files`
//! - `[extract].extensions`: the built-in allow-list
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::extract::{Strategy, DEFAULT_EXTENSIONS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// File-lister configuration section under `[inventory]`.
pub struct InventoryCfg {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Extraction configuration section under `[extract]`.
pub struct ExtractCfg {
    /// Closed allow-list of file extensions for the free-text scan.
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `refaudit.toml|yaml`.
pub struct RefauditConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub threshold: Option<f64>,
    pub strategy: Option<Strategy>,
    pub format: Option<String>,
    #[serde(default)]
    pub inventory: Option<InventoryCfg>,
    #[serde(default)]
    pub extract: Option<ExtractCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the audit after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub input: String,
    pub output: String,
    pub threshold: f64,
    pub strategy: Strategy,
    pub format: String,
    pub inventory_command: String,
    pub inventory_args: Vec<String>,
    pub extensions: Vec<String>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `refaudit.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("refaudit.toml").exists()
            || cur.join("refaudit.yaml").exists()
            || cur.join("refaudit.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `RefauditConfig` from `refaudit.toml` or `refaudit.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<RefauditConfig> {
    let toml_path = root.join("refaudit.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: RefauditConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["refaudit.yaml", "refaudit.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: RefauditConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_input: Option<&str>,
    cli_output: Option<&str>,
    cli_threshold: Option<f64>,
    cli_strategy: Option<Strategy>,
    cli_format: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let input = cli_input
        .map(|s| s.to_string())
        .or(cfg.input)
        .unwrap_or_else(|| "BUG_REPORT.md".to_string());

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "BUG_REPORT_VALIDATED.md".to_string());

    let threshold = cli_threshold.or(cfg.threshold).unwrap_or(0.05);

    let strategy = cli_strategy.or(cfg.strategy).unwrap_or(Strategy::Text);

    let format = cli_format
        .map(|s| s.to_string())
        .or(cfg.format)
        .unwrap_or_else(|| "human".to_string());

    let inventory_command = cfg
        .inventory
        .as_ref()
        .and_then(|i| i.command.clone())
        .unwrap_or_else(|| "rg".to_string());
    let inventory_args = cfg
        .inventory
        .as_ref()
        .and_then(|i| i.args.clone())
        .unwrap_or_else(|| vec!["--files".to_string()]);

    let extensions = cfg
        .extract
        .as_ref()
        .and_then(|e| e.extensions.clone())
        .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect());

    Effective {
        repo_root,
        input,
        output,
        threshold,
        strategy,
        format,
        inventory_command,
        inventory_args,
        extensions,
    }
}
