use std::sync::Mutex;

use permanence_core::models::config::UserConfig;
use permanence_core::models::form::FormDocument;
use permanence_core::paths::IdStyle;

use crate::error::StorageError;

/// Persistence contract for form documents and the user config object.
pub trait DocumentStore: Send + Sync {
    /// Load a form document; `StorageError::NotFound` if it doesn't exist.
    fn load_form(&self, id: &str) -> Result<FormDocument, StorageError>;

    /// Overwrite the whole document stored under `id`.
    fn save_form(&self, id: &str, form: &FormDocument) -> Result<(), StorageError>;

    /// Ids of every stored form, sorted.
    fn list_form_ids(&self) -> Result<Vec<String>, StorageError>;

    /// Remove a form. Removing a form that doesn't exist succeeds.
    fn delete_form(&self, id: &str) -> Result<(), StorageError>;

    /// The user config, or the default when it is missing or unreadable.
    fn load_config(&self) -> UserConfig;

    fn save_config(&self, config: &UserConfig) -> Result<(), StorageError>;

    /// Convention for deriving ids from form names.
    fn id_style(&self) -> IdStyle {
        IdStyle::default()
    }

    /// Held across load-modify-save cycles so that writers sharing this store
    /// do not overwrite each other's updates.
    fn write_lock(&self) -> &Mutex<()>;
}

/// Reject ids that are empty or could escape the forms directory.
pub fn validate_id(id: &str) -> Result<(), StorageError> {
    let invalid = id.is_empty()
        || id.starts_with('.')
        || id.contains(['/', '\\'])
        || id.chars().any(char::is_control);
    if invalid {
        return Err(StorageError::InvalidId { id: id.to_string() });
    }
    Ok(())
}
