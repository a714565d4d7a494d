//! Durable, versioned settings persistence.
//!
//! The live [`Settings`] model is loaded from and saved to a per-user XML
//! document through the flat [`SettingsRecord`] wire type. Path resolution,
//! the codec, and the model are independent pieces: an absent path means
//! persistence is unavailable and load/save are skipped, never fatal.

pub mod model;
pub mod paths;
pub mod protocol;

pub use model::{Settings, DEFAULT_DATE_COLUMN_FORMAT, SETTINGS_VERSION};
pub use paths::{resolve_under, settings_path};
pub use protocol::{load_record, save_record, SettingsError, SettingsRecord};
