//! Resolution of the on-disk settings file location.
//!
//! The location is derived from the platform's per-user data directory
//! (`%APPDATA%` on Windows, the XDG config dir elsewhere) plus a fixed
//! application subdirectory. Resolution failure is not an error: callers
//! treat an absent path as "persistence unavailable" and skip load/save.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Application subdirectory under the user-data dir.
const APP_DIR: &str = "HeartRate";

/// Settings file name.
const SETTINGS_FILE: &str = "settings.xml";

static RESOLVED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Resolve the settings file path, memoized once per process.
///
/// Creates the containing directory on first call. Returns `None` if the
/// user-data directory cannot be determined or the directory cannot be
/// created. Safe to call concurrently; only the first call does any work.
pub fn settings_path() -> Option<PathBuf> {
    RESOLVED
        .get_or_init(|| {
            let base = dirs::config_dir()?;
            resolve_under(&base)
        })
        .clone()
}

/// Resolve the settings file path under an explicit base directory.
///
/// Same directory-creation behavior as [`settings_path`] but without the
/// process-wide memoization, for callers that inject their own root.
pub fn resolve_under(base: &Path) -> Option<PathBuf> {
    if base.as_os_str().is_empty() {
        return None;
    }

    let app_dir = base.join(APP_DIR);
    if let Err(e) = fs::create_dir_all(&app_dir) {
        log::warn!("Could not create settings directory {app_dir:?}: {e}");
        return None;
    }

    Some(app_dir.join(SETTINGS_FILE))
}
