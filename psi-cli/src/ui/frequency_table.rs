// psi-cli/src/ui/frequency_table.rs
//! Renders the frequency table of a report with `comfy-table`.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::io::{self, Write};

use psi_core::PsiReport;

use crate::ui::output_format::format_psi;
use crate::ui::theme::{ThemeEntry, ThemeMap};

fn themed_cell(text: String, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> Cell {
    let cell = Cell::new(text);
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) if supports_color => cell.fg(color.to_table_color()),
        _ => cell,
    }
}

fn numeric_cell(text: String, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> Cell {
    themed_cell(text, entry, theme, supports_color).set_alignment(CellAlignment::Right)
}

/// Builds the table: one row per category, then the total.
///
/// Frequencies are shown unregularised; contributions use `regulariser`.
pub fn build_frequency_table(
    report: &PsiReport,
    regulariser: f64,
    theme: &ThemeMap,
    supports_color: bool,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Category", "Expected", "Actual", "Contribution"]);

    let contributions = report.table.contributions(regulariser);
    for (row, contribution) in report.table.iter().zip(contributions) {
        table.add_row(vec![
            themed_cell(row.category.to_string(), ThemeEntry::Category, theme, supports_color),
            numeric_cell(format!("{:.4}", row.expected), ThemeEntry::Frequency, theme, supports_color),
            numeric_cell(format!("{:.4}", row.actual), ThemeEntry::Frequency, theme, supports_color),
            numeric_cell(format!("{:.6}", contribution), ThemeEntry::Contribution, theme, supports_color),
        ]);
    }

    table.add_row(vec![
        Cell::new("total"),
        numeric_cell(format!("{:.4}", report.table.expected_total()), ThemeEntry::Frequency, theme, supports_color),
        numeric_cell(format!("{:.4}", report.table.actual_total()), ThemeEntry::Frequency, theme, supports_color),
        numeric_cell(
            format_psi(report.psi),
            ThemeEntry::for_severity(report.severity),
            theme,
            supports_color,
        ),
    ]);
    table
}

pub fn print_frequency_table<W: Write>(
    writer: &mut W,
    report: &PsiReport,
    regulariser: f64,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", build_frequency_table(report, regulariser, theme, supports_color))
}
