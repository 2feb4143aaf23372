//! Table projection: one row per event × interpretation.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use diary_events::EventLog;
use serde::{Deserialize, Serialize};

/// Column headers of the table projection.
pub const TABLE_HEADERS: [&str; 5] = ["Date", "Name", "Event", "Interpretation", "Posterior"];

/// One flattened row of the table projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub date: String,
    pub owner_name: String,
    pub event_label: String,
    pub interpretation_label: String,
    /// Stored percent with a `%` suffix, e.g. `"85.7%"`
    pub posterior: String,
}

impl TableRow {
    /// Cells in header order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.owner_name.as_str(),
            self.event_label.as_str(),
            self.interpretation_label.as_str(),
            self.posterior.as_str(),
        ]
    }
}

/// Flattens the log into exactly three rows per record, in log order and
/// then interpretation order.
pub fn to_rows(log: &EventLog) -> Vec<TableRow> {
    log.iter()
        .flat_map(|record| {
            record.interpretations.iter().map(move |interp| TableRow {
                date: record.date.clone(),
                owner_name: record.owner_name.clone(),
                event_label: record.event_label.clone(),
                interpretation_label: interp.label.clone(),
                posterior: interp.formatted_posterior(),
            })
        })
        .collect()
}

/// Renders rows as a terminal table with a header row.
pub fn render_table(rows: &[TableRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(TABLE_HEADERS);

    for row in rows {
        table.add_row(row.cells());
    }

    let mut out = table.to_string();
    out.push('\n');
    out
}
