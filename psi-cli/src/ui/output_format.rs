// psi-cli/src/ui/output_format.rs
//! Themed messages and the one-line PSI summary.
//!
//! Every printer takes the writer and a `supports_color` flag so callers decide
//! whether the target is a terminal.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use psi_core::PsiReport;

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme color of `entry` to `text`, if color is wanted.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> String {
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) if supports_color => text.color(color.to_ansi_color()).to_string(),
        _ => text.to_string(),
    }
}

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", styled(&format!("{}{}", prefix, msg), entry, theme, supports_color))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "", msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "", msg, ThemeEntry::Success, theme, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "Warning: ", msg, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "Error: ", msg, ThemeEntry::Error, theme, supports_color)
}

pub fn print_header<W: Write>(writer: &mut W, title: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    writeln!(writer, "{}", styled(&format!("--- {} ---", title), ThemeEntry::Header, theme, supports_color))
}

/// Formats an index for display; NaN reads as `undefined`.
pub fn format_psi(psi: f64) -> String {
    if psi.is_nan() {
        "undefined".to_string()
    } else {
        format!("{:.6}", psi)
    }
}

/// Prints `PSI: <value> (<severity>)` followed by how the samples were treated.
pub fn print_summary<W: Write>(
    writer: &mut W,
    report: &PsiReport,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let headline = format!("PSI: {} ({})", format_psi(report.psi), report.severity);
    let severity_entry = ThemeEntry::for_severity(report.severity);
    write!(writer, "{}", styled(&headline, severity_entry, theme, supports_color))?;

    match (&report.data_kind, &report.edges) {
        (Some(kind), Some(edges)) => {
            write!(writer, " [{} data, {} bin(s)", kind, edges.bin_count())?;
            if edges.merged_edges() > 0 {
                write!(writer, ", {} edge(s) merged", edges.merged_edges())?;
            }
            writeln!(writer, "]")
        }
        (Some(kind), None) => writeln!(writer, " [{} data, {} categories]", kind, report.table.len()),
        (None, _) => writeln!(writer, " [empty sample]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use psi_core::{Bins, PsiEngine, PsiOptions};

    #[test]
    fn test_plain_messages_have_no_escapes() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "careful", &theme, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Warning: careful\n");
    }

    #[test]
    fn test_colored_messages_carry_escapes() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_error_message(&mut buf, "boom", &theme, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("Error: boom"));
    }

    #[test]
    fn test_summary_line() {
        let theme = ThemeStyle::default_theme_map();
        let report = PsiEngine::new(PsiOptions::default().with_bins(Bins::Count(2)))
            .evaluate(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0])
            .unwrap();
        let mut buf = Vec::new();
        print_summary(&mut buf, &report, &theme, false).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "PSI: 0.000000 (stable) [numeric data, 2 bin(s)]\n"
        );
    }

    #[test]
    fn test_format_psi_nan() {
        assert_eq!(format_psi(f64::NAN), "undefined");
    }
}
