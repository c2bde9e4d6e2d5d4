//! Reference resolution against the file inventory.
//!
//! Fixed precedence, first match wins: exact path, then unique basename.
//! A multi-segment reference that misses the exact lookup is reported as
//! missing rather than guessed from its basename; basename fallback applies
//! only to bare filenames. Both extraction strategies share this policy.

use crate::inventory::{basename, Inventory};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of resolving one reference. Never cached; the inventory is
/// static for the whole run.
pub enum Resolution {
    Resolved(String),
    Missing,
    Ambiguous(usize),
    Empty,
}

impl Resolution {
    /// Human-readable reason for the mismatch table.
    pub fn reason(&self) -> String {
        match self {
            Resolution::Resolved(_) => String::new(),
            Resolution::Missing => "missing from current snapshot".to_string(),
            Resolution::Ambiguous(n) => format!("ambiguous basename ({} matches)", n),
            Resolution::Empty => "empty path reference".to_string(),
        }
    }
}

/// Resolve one raw reference string against the inventory.
pub fn resolve_ref(raw: &str, inventory: &Inventory) -> Resolution {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Resolution::Empty;
    }
    if inventory.contains(cleaned) {
        return Resolution::Resolved(cleaned.to_string());
    }
    if cleaned.contains('/') {
        return Resolution::Missing;
    }
    let matches = inventory.basename_matches(basename(cleaned));
    match matches {
        [single] => Resolution::Resolved(single.clone()),
        [] => Resolution::Missing,
        many => Resolution::Ambiguous(many.len()),
    }
}
