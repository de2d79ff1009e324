//! Duplicate-region summary printed at the end of `run` and by `duplicates`.

use disc_forge_core::DuplicateEntry;

pub(crate) const NO_DUPLICATES: &str = "No games found in multiple regions.";

/// Summary lines for duplicate entries already ordered by series key.
pub(crate) fn summary_lines(entries: &[DuplicateEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec![NO_DUPLICATES.to_string()];
    }

    let mut lines = vec!["Games found in multiple regions:".to_string()];
    let mut current: Option<&str> = None;
    for entry in entries {
        if current != Some(entry.series_key.as_str()) {
            lines.push(format!("Game {}:", entry.series_key));
            current = Some(entry.series_key.as_str());
        }
        lines.push(format!(
            "  - {} ({}, {}, {})",
            entry.identifier,
            entry.region,
            entry.name,
            entry.source_path.display()
        ));
    }
    lines
}

pub(crate) fn print_summary(entries: &[DuplicateEntry]) {
    for line in summary_lines(entries) {
        println!("{line}");
    }
}

#[cfg(test)]
#[path = "tests/summary_tests.rs"]
mod tests;
