//! Form-level operations built on any [`DocumentStore`].

use std::sync::PoisonError;

use serde::Serialize;
use serde_json::{Map, Value};

use permanence_core::models::form::{FormDocument, FormTemplate};
use permanence_core::paths::form_id_from_name;

use crate::error::StorageError;
use crate::store::DocumentStore;

/// One row of the form listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormEntry {
    pub id: String,
    /// Display name, or the id when the document has none.
    pub name: String,
    /// False when the document exists but could not be parsed.
    pub readable: bool,
}

/// List every stored form with its display name. Unreadable documents stay
/// in the listing so they can still be inspected or deleted.
pub fn list_forms(store: &dyn DocumentStore) -> Result<Vec<FormEntry>, StorageError> {
    let ids = store.list_form_ids()?;
    let mut entries = Vec::with_capacity(ids.len());

    for id in ids {
        let entry = match store.load_form(&id) {
            Ok(form) => FormEntry {
                name: if form.name.is_empty() {
                    id.clone()
                } else {
                    form.name
                },
                id,
                readable: true,
            },
            Err(e) => {
                tracing::error!(id = %id, error = %e, "failed to read form while listing");
                FormEntry {
                    name: id.clone(),
                    id,
                    readable: false,
                }
            }
        };
        entries.push(entry);
    }

    Ok(entries)
}

/// Templates of every readable form; unreadable documents are skipped.
pub fn load_templates(store: &dyn DocumentStore) -> Result<Vec<FormTemplate>, StorageError> {
    let ids = store.list_form_ids()?;
    let total = ids.len();

    let templates: Vec<FormTemplate> = ids
        .iter()
        .filter_map(|id| match store.load_form(id) {
            Ok(form) => Some(form.form_template),
            Err(e) => {
                tracing::error!(id = %id, error = %e, "skipping unreadable form");
                None
            }
        })
        .collect();

    tracing::debug!(read = templates.len(), total, "loaded form templates");
    Ok(templates)
}

/// Create a new form from a template and return its id.
///
/// The id is derived from the template name using the store's id style. Any
/// answers already on the template are dropped; a fresh form has no history.
pub fn create_form(
    store: &dyn DocumentStore,
    mut template: FormTemplate,
) -> Result<String, StorageError> {
    let id = form_id_from_name(&template.name, store.id_style());

    let _guard = store
        .write_lock()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    match store.load_form(&id) {
        Err(StorageError::NotFound { .. }) => {}
        Ok(_) | Err(StorageError::Serialization(_)) => {
            return Err(StorageError::AlreadyExists { id });
        }
        Err(e) => return Err(e),
    }

    for question in &mut template.questions {
        question.answers.clear();
    }
    let form = FormDocument {
        name: template.name.clone(),
        form_template: template,
        extra: Map::new(),
    };
    store.save_form(&id, &form)?;

    tracing::info!(id = %id, "form created");
    Ok(id)
}

/// Record one submission: append an answer to every question whose key
/// appears in `answers`, all stamped with `at`.
///
/// Keys that match no question are skipped. Questions without a new answer
/// are left as they were. Returns how many answers were appended; nothing is
/// written when that is zero.
pub fn append_answers(
    store: &dyn DocumentStore,
    id: &str,
    answers: &Map<String, Value>,
    at: jiff::Timestamp,
) -> Result<usize, StorageError> {
    let _guard = store
        .write_lock()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let mut form = store.load_form(id)?;
    let mut appended = 0;

    for (key, value) in answers {
        let question = form
            .form_template
            .questions
            .iter_mut()
            .find(|q| &q.key == key);
        match question {
            Some(question) => {
                question.push_answer(at, value.clone());
                appended += 1;
            }
            None => tracing::warn!(id, key = %key, "no question with this key, answer skipped"),
        }
    }

    if appended > 0 {
        store.save_form(id, &form)?;
    }

    tracing::info!(id, appended, "answers recorded");
    Ok(appended)
}
