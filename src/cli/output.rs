use crate::domain::entities::priced_listing::{ListingRecord, RECORD_FIELDS};

/// Renders records as a column-aligned text table with a header row.
pub fn render_table(records: &[ListingRecord]) -> String {
    let mut widths: Vec<usize> = RECORD_FIELDS.iter().map(|h| h.chars().count()).collect();
    for record in records {
        for (w, value) in widths.iter_mut().zip(record.values()) {
            *w = (*w).max(value.chars().count());
        }
    }

    let row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}", w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![row(RECORD_FIELDS.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(records.iter().map(|r| row(r.values().collect())));
    lines.join("\n")
}

pub fn render_json(records: &[ListingRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
