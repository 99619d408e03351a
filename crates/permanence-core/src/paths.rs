//! On-disk naming conventions.
//!
//! Pure string functions. These define the canonical layout of the local data
//! directory: one JSON file per form under the forms directory, plus a single
//! user config file at the root.

use serde::{Deserialize, Serialize};

/// Application identifier appended to the platform local-data directory.
pub const APP_ID: &str = "com.patient-permanence.physician";

pub const DEFAULT_FORMS_DIR: &str = "assignedForms";

pub const CONFIG_FILE: &str = "user_config.json";

pub const FORM_EXTENSION: &str = "json";

pub fn form_file(id: &str) -> String {
    format!("{id}.{FORM_EXTENSION}")
}

/// Temp sibling used for write-then-rename.
pub fn temp_file(file_name: &str) -> String {
    format!("{file_name}.tmp")
}

/// Strip the form extension from a directory entry name, if it has one.
pub fn form_id_from_file(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(FORM_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}

/// Word separator used when deriving a form id from its display name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStyle {
    #[default]
    Underscore,
    Hyphen,
}

impl IdStyle {
    pub fn separator(self) -> char {
        match self {
            IdStyle::Underscore => '_',
            IdStyle::Hyphen => '-',
        }
    }
}

/// Derive a file-safe form id from a display name.
///
/// Lowercases, turns whitespace, `-` and `_` runs into a single separator,
/// drops anything that isn't ASCII alphanumeric and trims separators from both
/// ends. Names that leave nothing behind get a `form-<unix millis>` id.
pub fn form_id_from_name(name: &str, style: IdStyle) -> String {
    let sep = style.separator();
    let mut id = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_sep = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_sep && !id.is_empty() {
                id.push(sep);
            }
            pending_sep = false;
            id.push(c);
        }
    }

    if id.is_empty() {
        return format!("form-{}", jiff::Timestamp::now().as_millisecond());
    }
    id
}
