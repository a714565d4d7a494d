//! The versioned wire record persisted to the settings document.
//!
//! [`SettingsRecord`] mirrors [`Settings`] with primitive encodings only:
//! colors as 8-hex-digit uppercase ARGB strings, durations as integer
//! milliseconds. It is constructed transiently during save and load and is
//! never held as application state. Every non-version field is optional so
//! a partial or older document decodes cleanly and leaves the corresponding
//! live fields untouched.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};

use crate::color::Argb;
use crate::settings::model::{Settings, DEFAULT_DATE_COLUMN_FORMAT};

/// Root element of the persisted document.
const ROOT_TAG: &str = "HeartRateSettings";

/// Files smaller than this are treated as empty/corrupt and ignored.
const MIN_DOCUMENT_LEN: u64 = 5;

/// Errors crossing the settings persistence boundary.
#[derive(Debug)]
pub enum SettingsError {
    /// No settings path could be resolved; load/save must be skipped.
    PathUnavailable,
    Io(String),
    Parse(String),
    Serialize(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::PathUnavailable => write!(f, "Settings path unavailable"),
            SettingsError::Io(e) => write!(f, "IO error: {e}"),
            SettingsError::Parse(e) => write!(f, "Parse error: {e}"),
            SettingsError::Serialize(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Flat record serialized to/from the settings document.
///
/// Field names are stable wire identifiers; do not rename across versions
/// without a migration path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettingsRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub font_name: Option<String>,
    #[serde(rename = "UIFontName")]
    pub ui_font_name: Option<String>,
    pub alert_level: Option<u32>,
    pub warn_level: Option<u32>,
    /// Milliseconds.
    pub alert_timeout: Option<u64>,
    /// Milliseconds.
    pub disconnected_timeout: Option<u64>,
    pub color: Option<String>,
    pub warn_color: Option<String>,
    #[serde(rename = "UIColor")]
    pub ui_color: Option<String>,
    #[serde(rename = "UIWarnColor")]
    pub ui_warn_color: Option<String>,
    #[serde(rename = "UIBackgroundColor")]
    pub ui_background_color: Option<String>,
    pub sizable: Option<bool>,
    pub log_format: Option<String>,
    pub log_date_format: Option<String>,
    pub log_file: Option<String>,
}

fn default_version() -> u32 {
    1
}

impl SettingsRecord {
    /// Encode live settings into the wire record. Pure and total: every
    /// field maps, with empty log format/file values substituted by their
    /// defaults so the entries are always written.
    pub fn encode(settings: &Settings) -> Self {
        Self {
            version: settings.version,
            font_name: Some(settings.font_name.clone()),
            ui_font_name: Some(settings.ui_font_name.clone()),
            alert_level: Some(settings.alert_level),
            warn_level: Some(settings.warn_level),
            alert_timeout: Some(settings.alert_timeout.as_millis() as u64),
            disconnected_timeout: Some(settings.disconnected_timeout.as_millis() as u64),
            color: Some(settings.color.to_hex()),
            warn_color: Some(settings.warn_color.to_hex()),
            ui_color: Some(settings.ui_color.to_hex()),
            ui_warn_color: Some(settings.ui_warn_color.to_hex()),
            ui_background_color: Some(settings.ui_background_color.to_hex()),
            sizable: Some(settings.sizable),
            log_format: Some(settings.log_format.clone()),
            log_date_format: Some(or_default(
                &settings.log_date_format,
                DEFAULT_DATE_COLUMN_FORMAT,
            )),
            log_file: Some(or_default(&settings.log_file, " ")),
        }
    }

    /// Merge this record onto an existing [`Settings`] instance.
    ///
    /// Only fields present in the record are overwritten; absent fields keep
    /// their current values. All color strings are validated before any
    /// mutation so a malformed document never leaves the target half-applied.
    pub fn apply(&self, settings: &mut Settings) -> Result<(), SettingsError> {
        let color = parse_color(&self.color)?;
        let warn_color = parse_color(&self.warn_color)?;
        let ui_color = parse_color(&self.ui_color)?;
        let ui_warn_color = parse_color(&self.ui_warn_color)?;
        let ui_background_color = parse_color(&self.ui_background_color)?;

        if let Some(ref v) = self.font_name {
            settings.font_name = v.clone();
        }
        if let Some(ref v) = self.ui_font_name {
            settings.ui_font_name = v.clone();
        }
        if let Some(v) = self.alert_level {
            settings.alert_level = v;
        }
        if let Some(v) = self.warn_level {
            settings.warn_level = v;
        }
        if let Some(ms) = self.alert_timeout {
            settings.alert_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.disconnected_timeout {
            settings.disconnected_timeout = Duration::from_millis(ms);
        }
        if let Some(v) = color {
            settings.color = v;
        }
        if let Some(v) = warn_color {
            settings.warn_color = v;
        }
        if let Some(v) = ui_color {
            settings.ui_color = v;
        }
        if let Some(v) = ui_warn_color {
            settings.ui_warn_color = v;
        }
        if let Some(v) = ui_background_color {
            settings.ui_background_color = v;
        }
        if let Some(v) = self.sizable {
            settings.sizable = v;
        }
        if let Some(ref v) = self.log_format {
            settings.log_format = v.clone();
        }
        if let Some(ref v) = self.log_date_format {
            settings.log_date_format = v.clone();
        }
        if let Some(ref v) = self.log_file {
            // XML readers may normalize the whitespace-only sentinel away;
            // restore it so log_file stays non-empty.
            settings.log_file = or_default(v, " ");
        }

        // Schema 1 defines every field above. A field introduced by a later
        // schema must be applied only when `self.version` is at least the
        // version that introduced it.

        Ok(())
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn parse_color(value: &Option<String>) -> Result<Option<Argb>, SettingsError> {
    value
        .as_deref()
        .map(Argb::from_hex)
        .transpose()
        .map_err(|e| SettingsError::Parse(e.to_string()))
}

/// Read and parse the document at `path`.
///
/// `Ok(None)` means no usable data: the file does not exist or is smaller
/// than the plausibility threshold. A document that exists but fails to
/// parse is a [`SettingsError::Parse`].
pub fn load_record(path: Option<&Path>) -> Result<Option<SettingsRecord>, SettingsError> {
    let path = path.ok_or(SettingsError::PathUnavailable)?;
    log::debug!("Loading settings from {path:?}");

    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SettingsError::Io(e.to_string())),
    };
    if len < MIN_DOCUMENT_LEN {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
    let record = quick_xml::de::from_str(&content)
        .map_err(|e| SettingsError::Parse(e.to_string()))?;

    Ok(Some(record))
}

/// Serialize `record` and write the full document to `path`, overwriting
/// any existing content.
pub fn save_record(path: Option<&Path>, record: &SettingsRecord) -> Result<(), SettingsError> {
    let path = path.ok_or(SettingsError::PathUnavailable)?;
    log::debug!("Saving settings to {path:?}");

    let document = to_document(record)?;
    fs::write(path, document).map_err(|e| SettingsError::Io(e.to_string()))?;

    Ok(())
}

/// Serialize `record` into an indented XML document string.
pub fn to_document(record: &SettingsRecord) -> Result<String, SettingsError> {
    let mut buf = String::new();
    let mut ser = Serializer::with_root(&mut buf, Some(ROOT_TAG))
        .map_err(|e| SettingsError::Serialize(e.to_string()))?;
    ser.indent(' ', 2);
    record
        .serialize(ser)
        .map_err(|e| SettingsError::Serialize(e.to_string()))?;

    Ok(buf)
}
