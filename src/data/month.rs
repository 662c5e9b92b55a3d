//! Month labels for sales files
//!
//! A month comes either from an explicit tag or from the sales file name. Both paths
//! go through [`normalize_month_label`] so they agree on the grouping key.

use std::cmp::Ordering;
use std::path::Path;

use chrono::Month;

/// Length of the fixed export prefix on sales file names ("MSY Data -May.csv" style)
pub const MONTH_LABEL_PREFIX_LEN: usize = 10;

/// Normalize a month label: trimmed, first letter upper-case, rest lower-case
pub fn normalize_month_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Derive a month label from a sales file path
///
/// The prefix is only stripped from stems longer than it, so plain "may.csv" files
/// keep their whole name.
pub fn month_label_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let label: String = if stem.chars().count() > MONTH_LABEL_PREFIX_LEN {
        stem.chars().skip(MONTH_LABEL_PREFIX_LEN).collect()
    } else {
        stem
    };

    normalize_month_label(&label)
}

/// Calendar month number for labels that name a month ("May", "sep", "October")
pub fn calendar_month(label: &str) -> Option<u32> {
    label
        .trim()
        .parse::<Month>()
        .ok()
        .map(|m| m.number_from_month())
}

/// Order month labels: calendar months first in calendar order, then the rest
/// alphabetically
pub fn compare_month_labels(a: &str, b: &str) -> Ordering {
    match (calendar_month(a), calendar_month(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
