// src/process/columns.rs

use super::types::RawRow;

/// Trim + lower-case. Applied to both header labels and candidate names.
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A row with its labels normalized once, so a dozen field lookups don't
/// re-normalize every header.
pub struct ColumnResolver<'r> {
    columns: Vec<(String, &'r str)>,
}

impl<'r> ColumnResolver<'r> {
    pub fn new(row: &'r RawRow) -> Self {
        let columns = row
            .iter()
            .map(|(label, value)| (normalize_label(label), value.as_str()))
            .collect();
        Self { columns }
    }

    /// Value of the first column whose label contains a candidate.
    ///
    /// Candidates are tried in the given priority order and, for each, columns in
    /// header order. The first hit wins even when its cell is empty; a lower
    /// priority candidate is only consulted when no label contains the higher one.
    /// Returns `""` when nothing matches.
    pub fn resolve(&self, candidates: &[&str]) -> &'r str {
        for candidate in candidates {
            let needle = normalize_label(candidate);
            if let Some(&(_, value)) = self
                .columns
                .iter()
                .find(|(label, _)| label.contains(needle.as_str()))
            {
                return value;
            }
        }
        ""
    }
}

/// One-off lookup; see [`ColumnResolver::resolve`].
pub fn resolve<'r>(row: &'r RawRow, candidates: &[&str]) -> &'r str {
    ColumnResolver::new(row).resolve(candidates)
}
