use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use permanence_core::models::config::UserConfig;
use permanence_core::models::form::FormDocument;
use permanence_core::paths::{self, IdStyle};

use crate::error::StorageError;
use crate::files::{read_optional, write_atomic};
use crate::store::{validate_id, DocumentStore};

/// Where and how a [`LocalStore`] keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub root: PathBuf,
    /// Subdirectory of `root` holding one JSON file per form.
    pub forms_dir: String,
    pub id_style: IdStyle,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            forms_dir: paths::DEFAULT_FORMS_DIR.to_string(),
            id_style: IdStyle::default(),
        }
    }

    /// The platform local-data directory for this application.
    pub fn default_location() -> Result<Self, StorageError> {
        let base = dirs::data_local_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(base.join(paths::APP_ID)))
    }

    pub fn with_forms_dir(mut self, forms_dir: impl Into<String>) -> Self {
        self.forms_dir = forms_dir.into();
        self
    }

    pub fn with_id_style(mut self, id_style: IdStyle) -> Self {
        self.id_style = id_style;
        self
    }
}

/// Form documents and config as JSON files on local disk.
#[derive(Debug)]
pub struct LocalStore {
    config: StoreConfig,
    forms_path: PathBuf,
    config_path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Prepare the directory layout and return a handle to it.
    ///
    /// Safe to call repeatedly: existing directories and an existing config
    /// file are left untouched.
    pub fn open(config: StoreConfig) -> Result<Self, StorageError> {
        let forms_path = config.root.join(&config.forms_dir);
        let config_path = config.root.join(paths::CONFIG_FILE);

        std::fs::create_dir_all(&forms_path).map_err(|e| StorageError::io(&forms_path, e))?;

        let store = Self {
            config,
            forms_path,
            config_path,
            write_lock: Mutex::new(()),
        };

        if !store.config_path.exists() {
            tracing::info!(path = %store.config_path.display(), "writing default user config");
            store.save_config(&UserConfig::default())?;
        }

        tracing::debug!(forms = %store.forms_path.display(), "local store ready");
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn forms_path(&self) -> &Path {
        &self.forms_path
    }

    pub fn form_path(&self, id: &str) -> PathBuf {
        self.forms_path.join(paths::form_file(id))
    }
}

impl DocumentStore for LocalStore {
    fn load_form(&self, id: &str) -> Result<FormDocument, StorageError> {
        validate_id(id)?;
        let path = self.form_path(id);
        let bytes = read_optional(&path)?.ok_or_else(|| StorageError::NotFound {
            id: id.to_string(),
        })?;
        let form = serde_json::from_slice(&bytes)?;
        tracing::debug!(id, path = %path.display(), "form loaded");
        Ok(form)
    }

    fn save_form(&self, id: &str, form: &FormDocument) -> Result<(), StorageError> {
        validate_id(id)?;
        let path = self.form_path(id);
        let json = serde_json::to_vec_pretty(form)?;
        write_atomic(&path, &json)?;
        tracing::info!(id, path = %path.display(), "form saved");
        Ok(())
    }

    fn list_form_ids(&self) -> Result<Vec<String>, StorageError> {
        let entries =
            std::fs::read_dir(&self.forms_path).map_err(|e| StorageError::io(&self.forms_path, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.forms_path, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(id) = entry.file_name().to_str().and_then(paths::form_id_from_file) {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn delete_form(&self, id: &str) -> Result<(), StorageError> {
        validate_id(id)?;
        let path = self.form_path(id);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(id, path = %path.display(), "form deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(id, "attempted to delete a form that does not exist");
                Ok(())
            }
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn load_config(&self) -> UserConfig {
        let bytes = match read_optional(&self.config_path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(path = %self.config_path.display(), "no user config, using default");
                return UserConfig::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read user config, using default");
                return UserConfig::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => UserConfig::merged_with_defaults(value),
            Err(e) => {
                tracing::warn!(
                    path = %self.config_path.display(),
                    error = %e,
                    "user config is not valid JSON, using default"
                );
                UserConfig::default()
            }
        }
    }

    fn save_config(&self, config: &UserConfig) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(config)?;
        write_atomic(&self.config_path, &json)?;
        tracing::info!(path = %self.config_path.display(), "user config saved");
        Ok(())
    }

    fn id_style(&self) -> IdStyle {
        self.config.id_style
    }

    fn write_lock(&self) -> &Mutex<()> {
        &self.write_lock
    }
}
