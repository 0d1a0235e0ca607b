// psi-cli/src/commands/profiles.rs
//! The `profiles` command.

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io::{self, Write};

use psi_core::{list_available_profiles, profile_candidate_paths};

use crate::commands::info_msg;
use crate::ui::output_format::{print_header, styled};
use crate::ui::theme::{ThemeEntry, ThemeMap};

pub fn run_list_profiles(theme_map: &ThemeMap) -> Result<()> {
    let profiles = list_available_profiles();
    if profiles.is_empty() {
        let searched: Vec<String> = profile_candidate_paths("<name>")
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        info_msg(format!("No profiles found. Searched: {}", searched.join(", ")), theme_map);
        return Ok(());
    }

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    print_header(&mut writer, "Available profiles", theme_map, supports_color)?;
    for profile in profiles {
        let name = styled(&profile.profile_name, ThemeEntry::Category, theme_map, supports_color);
        match (&profile.description, &profile.path) {
            (Some(description), Some(path)) => writeln!(writer, "{}: {} ({})", name, description, path.display())?,
            (None, Some(path)) => writeln!(writer, "{} ({})", name, path.display())?,
            (Some(description), None) => writeln!(writer, "{}: {}", name, description)?,
            (None, None) => writeln!(writer, "{}", name)?,
        }
    }
    Ok(())
}
