//! Named PSI profiles.
//!
//! A profile is a YAML file holding a partial [`PsiConfig`] under a name, so
//! that monitoring jobs can share binning settings (for instance
//! `quantile-deciles` or `coarse-equidistant`). Profiles are looked up by name
//! in a fixed list of directories, or loaded from an explicit path.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{merge_config, parse_yaml, PsiConfig};

/// A named, partial configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub profile_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub settings: PsiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub profile_name: String,
    pub description: Option<String>,
    pub path: Option<PathBuf>,
}

/// Directories searched for `<name>.yaml`, in priority order.
pub fn profile_directories() -> Vec<PathBuf> {
    vec![
        dirs::home_dir().map(|p| p.join(".psi").join("profiles")),
        dirs::config_dir().map(|p| p.join("psi").join("profiles")),
        Some(PathBuf::from("/etc/psi/profiles")),
        Some(PathBuf::from("./config")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn profile_candidate_paths(name: &str) -> Vec<PathBuf> {
    profile_directories()
        .into_iter()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Loads a profile from a file path, or by name from the profile directories.
pub fn load_profile_by_name(name_or_path: &str) -> Result<ProfileConfig> {
    debug!("Attempting to load profile from: '{}'", name_or_path);

    let path_to_load = {
        let path = Path::new(name_or_path);
        if path.is_file() {
            Some(path.to_path_buf())
        } else {
            profile_candidate_paths(name_or_path)
                .into_iter()
                .find(|p| p.is_file())
        }
    }
    .with_context(|| {
        format!(
            "Profile '{}' not found. It is not a valid file path, and was not found in expected locations.",
            name_or_path
        )
    })?;

    let text = fs::read_to_string(&path_to_load)
        .with_context(|| format!("reading profile file {}", path_to_load.display()))?;
    let profile: ProfileConfig = parse_yaml(&text)
        .with_context(|| format!("parsing profile YAML {}", path_to_load.display()))?;

    profile
        .settings
        .to_options()
        .and_then(|options| options.validate())
        .with_context(|| format!("Invalid settings in profile '{}'", profile.profile_name))?;

    debug!("Successfully loaded profile '{}'.", profile.profile_name);
    Ok(profile)
}

/// Layers a profile's settings over a base configuration.
pub fn apply_profile_to_config(profile: &ProfileConfig, base: PsiConfig) -> PsiConfig {
    debug!("Applying profile '{}'.", profile.profile_name);
    merge_config(base, Some(profile.settings.clone()))
}

/// Lists the profiles found in the profile directories.
pub fn list_available_profiles() -> Vec<ProfileSummary> {
    let mut out = Vec::new();
    let mut seen_paths: HashSet<PathBuf> = HashSet::new();

    for dir in profile_directories() {
        let Ok(entries) = fs::read_dir(&dir) else {
            debug!("Candidate profile directory not found: {}", dir.display());
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("yaml") || !seen_paths.insert(path.clone()) {
                continue;
            }
            match fs::read_to_string(&path).map(|s| serde_yml::from_str::<ProfileConfig>(&s)) {
                Ok(Ok(profile)) => out.push(ProfileSummary {
                    profile_name: profile.profile_name,
                    description: profile.description,
                    path: Some(path),
                }),
                Ok(Err(_)) => warn!("Failed to parse YAML for profile at: {}", path.display()),
                Err(e) => warn!("Failed to read profile file at '{}': {}", path.display(), e),
            }
        }
    }
    out
}
