//! Reference extraction from the source report.
//!
//! Two front ends share one resolver: a free-text scan that picks path-like
//! tokens out of every line, and a tabular scan that reads Markdown table
//! rows keyed on a finding identifier in the first column. They have
//! genuinely different input grammars, so they stay separate entry points.

use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Extensions recognized by the free-text scan when no override is
/// configured. Closed allow-list; a token must end in one of these.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "rs", "toml", "md", "json", "yaml", "yml", "xml", "properties", "gradle", "kts", "kt", "java",
    "groovy", "py", "sh", "ts", "js", "txt",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which extraction front end to run. The grammar is closed: anything other
/// than `text` or `table` is rejected at parse time, both on the CLI and in
/// the config file.
pub enum Strategy {
    Text,
    Table,
}

#[derive(Debug, Clone)]
/// A candidate file reference with its surrounding context. Tabular rows
/// additionally carry the finding identifier and the bug/fix columns.
pub struct Reference {
    pub line: usize,
    pub raw: String,
    pub context: String,
    pub finding_id: Option<String>,
    pub bug: Option<String>,
    pub fix: Option<String>,
}

/// Scan every line for path-like tokens ending in an allowed extension,
/// optionally suffixed with `:<line>`. A token is skipped when the character
/// immediately before it is a word character, `/`, `.`, or `-`. Matches are
/// deduplicated and sorted within a line; line order is preserved.
pub fn scan_text(source: &str, extensions: &[String]) -> Vec<Reference> {
    let re = build_token_regex(extensions);
    let mut refs: Vec<Reference> = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let line_number = idx + 1;
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for caps in re.captures_iter(line) {
            let m = caps.get(1).unwrap();
            if boundary_blocked(line, m.start()) {
                continue;
            }
            seen.insert(m.as_str().to_string());
        }
        for raw in seen {
            refs.push(Reference {
                line: line_number,
                raw,
                context: line.trim().to_string(),
                finding_id: None,
                bug: None,
                fix: None,
            });
        }
    }
    refs
}

/// Scan Markdown table rows. A row starts and ends with `|` after trimming
/// and its first cell must look like a finding identifier (one uppercase
/// letter followed by digits), which skips header and separator rows.
/// Column 2 is the path reference, column 3 the bug description, column 4
/// the proposed fix.
pub fn scan_table(source: &str) -> Vec<Reference> {
    let mut refs: Vec<Reference> = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.len() < 2 || !trimmed.starts_with('|') || !trimmed.ends_with('|') {
            continue;
        }
        let cells: Vec<&str> = trimmed[1..trimmed.len() - 1]
            .split('|')
            .map(|c| c.trim())
            .collect();
        let id = match cells.first() {
            Some(c) if is_finding_id(c) => (*c).to_string(),
            _ => continue,
        };
        let raw = clean_table_path(cells.get(1).copied().unwrap_or(""));
        refs.push(Reference {
            line: idx + 1,
            raw,
            context: trimmed.to_string(),
            finding_id: Some(id),
            bug: cells.get(2).map(|c| (*c).to_string()),
            fix: cells.get(3).map(|c| (*c).to_string()),
        });
    }
    refs
}

fn build_token_regex(extensions: &[String]) -> Regex {
    // Longer extensions first so "kts" is not eaten by "kt".
    let mut exts: Vec<String> = extensions.iter().map(|e| regex::escape(e)).collect();
    exts.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let pattern = format!(r"([A-Za-z0-9_./-]+\.(?:{}))(?::\d+)?", exts.join("|"));
    Regex::new(&pattern).expect("token pattern")
}

/// The regex crate has no look-behind; reject a match whose preceding
/// character would have extended the token.
fn boundary_blocked(line: &str, start: usize) -> bool {
    line[..start]
        .chars()
        .next_back()
        .map(|c| c.is_alphanumeric() || matches!(c, '_' | '/' | '.' | '-'))
        .unwrap_or(false)
}

fn is_finding_id(cell: &str) -> bool {
    let mut chars = cell.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    let rest = chars.as_str();
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
}

/// Strip backticks, keep the first whitespace-delimited token, and drop a
/// trailing `:<digits>` suffix.
fn clean_table_path(cell: &str) -> String {
    let stripped = cell.replace('`', "");
    let token = stripped.split_whitespace().next().unwrap_or("");
    match token.rfind(':') {
        Some(pos)
            if pos + 1 < token.len() && token[pos + 1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            token[..pos].to_string()
        }
        _ => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_text_scan_finds_paths_with_line_suffix() {
        let refs = scan_text("see src/main.rs:42 and docs/guide.md", &exts());
        let raws: Vec<&str> = refs.iter().map(|r| r.raw.as_str()).collect();
        assert_eq!(raws, ["docs/guide.md", "src/main.rs"]);
        assert_eq!(refs[0].line, 1);
        assert_eq!(refs[0].context, "see src/main.rs:42 and docs/guide.md");
    }

    #[test]
    fn test_text_scan_dedupes_within_a_line() {
        let refs = scan_text("a.rs then a.rs again", &exts());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "a.rs");
    }

    #[test]
    fn test_text_scan_preserves_line_order() {
        let refs = scan_text("first z.rs\nthen a.rs", &exts());
        assert_eq!(refs[0].raw, "z.rs");
        assert_eq!(refs[0].line, 1);
        assert_eq!(refs[1].raw, "a.rs");
        assert_eq!(refs[1].line, 2);
    }

    #[test]
    fn test_text_scan_longer_extension_wins() {
        let refs = scan_text("build.gradle.kts is the new one", &exts());
        assert_eq!(refs[0].raw, "build.gradle.kts");
    }

    #[test]
    fn test_text_scan_ignores_lines_without_tokens() {
        assert!(scan_text("no file references here", &exts()).is_empty());
        assert!(scan_text("", &exts()).is_empty());
    }

    #[test]
    fn test_table_scan_parses_rows_and_skips_headers() {
        let src = "\
| ID | File | Bug | Fix |
|---|---|---|---|
| B1 | `src/lib.rs:10` | off by one | clamp index |
| not-an-id | x.rs | y | z |
";
        let refs = scan_table(src);
        assert_eq!(refs.len(), 1);
        let r = &refs[0];
        assert_eq!(r.finding_id.as_deref(), Some("B1"));
        assert_eq!(r.raw, "src/lib.rs");
        assert_eq!(r.bug.as_deref(), Some("off by one"));
        assert_eq!(r.fix.as_deref(), Some("clamp index"));
        assert_eq!(r.line, 3);
    }

    #[test]
    fn test_table_scan_takes_first_token_only() {
        let refs = scan_table("| A2 | src/a.rs (moved) | b | f |");
        assert_eq!(refs[0].raw, "src/a.rs");
    }

    #[test]
    fn test_table_scan_keeps_empty_path_cell() {
        // Blank reference cell still yields a row; the resolver reports it
        let refs = scan_table("| C3 |  | desc | fix |");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "");
    }

    #[test]
    fn test_finding_id_shape() {
        assert!(is_finding_id("B12"));
        assert!(!is_finding_id("ID"));
        assert!(!is_finding_id("b1"));
        assert!(!is_finding_id("B"));
        assert!(!is_finding_id("---"));
    }

    #[test]
    fn test_boundary_rejects_mid_token_matches() {
        // "-suffix.rs" glued to a word: the whole token matches, never the tail
        let refs = scan_text("prefix-a.rs", &exts());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "prefix-a.rs");
    }

    #[test]
    fn test_boundary_blocks_token_glued_to_line_suffix() {
        // The second token starts right after ":12" with no separator
        let refs = scan_text("x.rs:12y.rs", &exts());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].raw, "x.rs");
    }
}
