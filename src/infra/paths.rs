// src/infra/paths.rs — Config path resolution
//
// WELLNESS_HOME overrides the default ~/.wellness-companion/ location.

use std::path::PathBuf;

/// Returns the WELLNESS_HOME override, if set.
fn wellness_home() -> Option<PathBuf> {
    std::env::var_os("WELLNESS_HOME").map(PathBuf::from)
}

/// Configuration directory: $WELLNESS_HOME/ or ~/.wellness-companion/
pub fn config_dir() -> PathBuf {
    if let Some(home) = wellness_home() {
        return home;
    }
    match directories::BaseDirs::new() {
        Some(base) => base.home_dir().join(".wellness-companion"),
        // No resolvable home: fall back to the working directory
        None => PathBuf::from(".wellness-companion"),
    }
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
