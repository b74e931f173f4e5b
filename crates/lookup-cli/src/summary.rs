use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{CheckSummary, EnrichSummary};

pub fn enrich_rows(summary: &EnrichSummary) -> Vec<(&'static str, String)> {
    let counts = summary.counts;
    vec![
        ("Input", summary.input.clone()),
        ("Output", summary.output.clone()),
        ("Lines read", counts.lines.to_string()),
        ("Written", counts.written.to_string()),
        ("Blank", counts.blank.to_string()),
        ("Skipped", counts.skipped.to_string()),
        ("Elapsed", format!("{:.2?}", summary.elapsed)),
    ]
}

pub fn check_rows(summary: &CheckSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Table file", summary.table_file.display().to_string()),
        ("Entries", summary.entries.to_string()),
        ("Strict", summary.strict.to_string()),
        ("Mode", summary.mode.clone()),
        ("Field", summary.field.clone()),
        (
            "Output field",
            summary
                .output_field
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

pub fn print_enrich_summary(summary: &EnrichSummary) {
    eprintln!("{}", summary_table(enrich_rows(summary)));
    if summary.counts.skipped > 0 {
        eprintln!(
            "{} line(s) were not valid JSON objects and were skipped",
            summary.counts.skipped
        );
    }
}

pub fn print_check_summary(summary: &CheckSummary) {
    eprintln!("{}", summary_table(check_rows(summary)));
}

pub fn summary_table(rows: Vec<(&'static str, String)>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    for (label, value) in rows {
        table.add_row(vec![label_cell(label), value_cell(value)]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Left);
    }
    table
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: String) -> Cell {
    if value == "-" {
        Cell::new(value).fg(Color::DarkGrey)
    } else {
        Cell::new(value)
    }
}
