//! The live, mutable settings consumed by the rest of the application.

use std::path::Path;
use std::time::Duration;

use crate::color::{self, Argb};
use crate::settings::protocol::{self, SettingsError, SettingsRecord};

/// Current schema version written to new settings documents.
pub const SETTINGS_VERSION: u32 = 1;

/// Default strftime pattern for the log timestamp column.
pub const DEFAULT_DATE_COLUMN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display and logging configuration, one instance per process.
///
/// Created via [`Settings::default`] and optionally overlaid with a
/// persisted record by [`Settings::load`]. Loading merges onto the existing
/// instance rather than replacing it, so fields missing from an older
/// document keep their current values.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub version: u32,
    pub font_name: String,
    pub ui_font_name: String,
    pub alert_level: u32,
    pub warn_level: u32,
    pub alert_timeout: Duration,
    pub disconnected_timeout: Duration,
    pub color: Argb,
    pub warn_color: Argb,
    pub ui_color: Argb,
    pub ui_warn_color: Argb,
    pub ui_background_color: Argb,
    pub sizable: bool,
    pub log_format: String,
    pub log_date_format: String,
    /// Never empty. " " is the unset sentinel so the entry is still written.
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            font_name: "Arial".to_string(),
            ui_font_name: "Arial".to_string(),
            alert_level: 70,
            warn_level: 65,
            alert_timeout: Duration::from_secs(120),
            disconnected_timeout: Duration::from_secs(10),
            color: color::LIGHT_BLUE,
            warn_color: color::RED,
            ui_color: color::DARK_BLUE,
            ui_warn_color: color::RED,
            ui_background_color: color::TRANSPARENT,
            sizable: true,
            log_format: "csv".to_string(),
            log_date_format: DEFAULT_DATE_COLUMN_FORMAT.to_string(),
            log_file: " ".to_string(),
        }
    }
}

impl Settings {
    /// Load the persisted document at `path` and merge it onto `self`.
    ///
    /// A missing or implausibly small file is not an error: `self` is left
    /// untouched and `Ok(false)` is returned. `Ok(true)` means a record was
    /// decoded and applied.
    pub fn load(&mut self, path: Option<&Path>) -> Result<bool, SettingsError> {
        match protocol::load_record(path)? {
            Some(record) => {
                record.apply(self)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Encode `self` and write the full document to `path`, overwriting.
    pub fn save(&self, path: Option<&Path>) -> Result<(), SettingsError> {
        protocol::save_record(path, &SettingsRecord::encode(self))
    }
}
