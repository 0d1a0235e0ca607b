//! Module for managing the application's command-line interface (CLI) theme.
//!
//! A theme maps the logical parts of the output (messages, table columns,
//! severity bands) onto 16-color ANSI foreground colors. Themes are loaded
//! from YAML files; entries a file leaves out keep their default color.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use psi_core::DriftSeverity;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Section titles.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// The category column of the frequency table.
    Category,
    /// The expected and actual frequency columns.
    Frequency,
    /// The per-category contribution column.
    Contribution,
    SeverityStable,
    SeverityModerate,
    SeveritySignificant,
    SeverityUndefined,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 12] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::Category,
        ThemeEntry::Frequency,
        ThemeEntry::Contribution,
        ThemeEntry::SeverityStable,
        ThemeEntry::SeverityModerate,
        ThemeEntry::SeveritySignificant,
        ThemeEntry::SeverityUndefined,
    ];

    /// The entry used to style a severity band.
    pub fn for_severity(severity: DriftSeverity) -> Self {
        match severity {
            DriftSeverity::Stable => ThemeEntry::SeverityStable,
            DriftSeverity::Moderate => ThemeEntry::SeverityModerate,
            DriftSeverity::Significant => ThemeEntry::SeveritySignificant,
            DriftSeverity::Undefined => ThemeEntry::SeverityUndefined,
        }
    }
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" |
            "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue" |
            "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor::Named(name.to_string())
    }

    /// Converts the color into its `owo_colors::AnsiColors` counterpart.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => match name.as_str() {
                "black" => AnsiColors::Black,
                "red" => AnsiColors::Red,
                "green" => AnsiColors::Green,
                "yellow" => AnsiColors::Yellow,
                "blue" => AnsiColors::Blue,
                "magenta" => AnsiColors::Magenta,
                "cyan" => AnsiColors::Cyan,
                "white" => AnsiColors::White,
                "brightblack" => AnsiColors::BrightBlack,
                "brightred" => AnsiColors::BrightRed,
                "brightgreen" => AnsiColors::BrightGreen,
                "brightyellow" => AnsiColors::BrightYellow,
                "brightblue" => AnsiColors::BrightBlue,
                "brightmagenta" => AnsiColors::BrightMagenta,
                "brightcyan" => AnsiColors::BrightCyan,
                "brightwhite" => AnsiColors::BrightWhite,
                _ => AnsiColors::White,
            },
        }
    }

    /// Converts the color for `comfy_table` cells, whose plain names are the
    /// bright variants.
    pub fn to_table_color(&self) -> comfy_table::Color {
        use comfy_table::Color;
        match self {
            ThemeColor::Named(name) => match name.as_str() {
                "black" => Color::Black,
                "red" => Color::DarkRed,
                "green" => Color::DarkGreen,
                "yellow" => Color::DarkYellow,
                "blue" => Color::DarkBlue,
                "magenta" => Color::DarkMagenta,
                "cyan" => Color::DarkCyan,
                "white" => Color::Grey,
                "brightblack" => Color::DarkGrey,
                "brightred" => Color::Red,
                "brightgreen" => Color::Green,
                "brightyellow" => Color::Yellow,
                "brightblue" => Color::Blue,
                "brightmagenta" => Color::Magenta,
                "brightcyan" => Color::Cyan,
                _ => Color::White,
            },
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    if let Some(path) = theme_path {
        ThemeStyle::load_from_file(path)
    } else {
        Ok(ThemeStyle::default_theme_map())
    }
}

impl ThemeStyle {
    /// Loads a theme from a YAML file on disk, filling gaps with the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        let mut default_theme = HashMap::new();
        let mut set = |entry: ThemeEntry, color: &str| {
            default_theme.insert(entry, ThemeStyle { fg: Some(ThemeColor::named(color)) });
        };
        set(ThemeEntry::Header, "brightcyan");
        set(ThemeEntry::Success, "green");
        set(ThemeEntry::Info, "white");
        set(ThemeEntry::Warn, "yellow");
        set(ThemeEntry::Error, "red");
        set(ThemeEntry::Category, "cyan");
        set(ThemeEntry::Frequency, "white");
        set(ThemeEntry::Contribution, "magenta");
        set(ThemeEntry::SeverityStable, "green");
        set(ThemeEntry::SeverityModerate, "yellow");
        set(ThemeEntry::SeveritySignificant, "brightred");
        set(ThemeEntry::SeverityUndefined, "brightblack");
        default_theme
    }
}
