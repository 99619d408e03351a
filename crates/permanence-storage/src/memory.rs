use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError, RwLock};

use permanence_core::models::config::UserConfig;
use permanence_core::models::form::FormDocument;
use permanence_core::paths::IdStyle;

use crate::error::StorageError;
use crate::store::{validate_id, DocumentStore};

/// In-process store. Documents are kept serialized, so every load hands out
/// a fresh copy exactly as a disk-backed store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    forms: RwLock<BTreeMap<String, String>>,
    config: RwLock<Option<String>>,
    id_style: IdStyle,
    write_lock: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_style(mut self, id_style: IdStyle) -> Self {
        self.id_style = id_style;
        self
    }

    /// Store raw text under `id` without validating it as a form.
    pub fn insert_raw(&self, id: &str, contents: impl Into<String>) {
        self.forms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), contents.into());
    }

    /// Replace the raw config text.
    pub fn set_raw_config(&self, contents: impl Into<String>) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(contents.into());
    }
}

impl DocumentStore for MemoryStore {
    fn load_form(&self, id: &str) -> Result<FormDocument, StorageError> {
        validate_id(id)?;
        let forms = self.forms.read().unwrap_or_else(PoisonError::into_inner);
        let raw = forms.get(id).ok_or_else(|| StorageError::NotFound {
            id: id.to_string(),
        })?;
        Ok(serde_json::from_str(raw)?)
    }

    fn save_form(&self, id: &str, form: &FormDocument) -> Result<(), StorageError> {
        validate_id(id)?;
        let raw = serde_json::to_string(form)?;
        self.forms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), raw);
        Ok(())
    }

    fn list_form_ids(&self) -> Result<Vec<String>, StorageError> {
        let forms = self.forms.read().unwrap_or_else(PoisonError::into_inner);
        Ok(forms.keys().cloned().collect())
    }

    fn delete_form(&self, id: &str) -> Result<(), StorageError> {
        validate_id(id)?;
        self.forms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        Ok(())
    }

    fn load_config(&self) -> UserConfig {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        match config.as_deref().map(serde_json::from_str::<serde_json::Value>) {
            Some(Ok(value)) => UserConfig::merged_with_defaults(value),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "user config is not valid JSON, using default");
                UserConfig::default()
            }
            None => UserConfig::default(),
        }
    }

    fn save_config(&self, config: &UserConfig) -> Result<(), StorageError> {
        let raw = serde_json::to_string(config)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(raw);
        Ok(())
    }

    fn id_style(&self) -> IdStyle {
        self.id_style
    }

    fn write_lock(&self) -> &Mutex<()> {
        &self.write_lock
    }
}
