//! Resolution of the on-disk location for the engine's preference store.

use std::{env, path::PathBuf};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".gastos_core";
const PREFS_FILE: &str = "prefs.json";

/// Returns the application-specific data directory, defaulting to `~/.gastos_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("GASTOS_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the preference document holding the day pointer, live totals,
/// and archived day records.
pub fn prefs_file() -> PathBuf {
    app_data_dir().join(PREFS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefs_file_lives_inside_data_dir() {
        let path = prefs_file();
        assert!(path.ends_with("prefs.json"));
        assert!(path.starts_with(app_data_dir()));
    }
}
