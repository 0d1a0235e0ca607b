// psi-cli/src/ui/mod.rs
//! Terminal rendering: themes, messages and the frequency table.

pub mod frequency_table;
pub mod output_format;
pub mod theme;
