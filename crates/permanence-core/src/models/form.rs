use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A persisted form: a template plus every answer recorded against it.
///
/// Fields this crate does not model (labels, options, editor metadata) are
/// carried in `extra` so a load/save cycle never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_template: FormTemplate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    /// A missing type reads as free text.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "DataType::is_unspecified"
    )]
    pub data_type: DataType,
    /// Category label used to group questions in summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
    /// Raw rule payload; interpreted according to `data_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problematic_values: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_values: Option<Value>,
    /// Append-only, oldest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: Vec<Answer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question {
    pub fn new(key: impl Into<String>, data_type: DataType) -> Self {
        Self {
            key: key.into(),
            data_type,
            form_name: None,
            problematic_values: None,
            critical_values: None,
            answers: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_form_name(mut self, form_name: impl Into<String>) -> Self {
        self.form_name = Some(form_name.into());
        self
    }

    pub fn with_problematic_values(mut self, rules: Value) -> Self {
        self.problematic_values = Some(rules);
        self
    }

    pub fn with_critical_values(mut self, rules: Value) -> Self {
        self.critical_values = Some(rules);
        self
    }

    /// Record a new answer at the end of the history.
    pub fn push_answer(&mut self, timestamp: jiff::Timestamp, value: Value) {
        self.answers.push(Answer { timestamp, value });
    }
}

/// One timestamped value recorded for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub timestamp: jiff::Timestamp,
    #[serde(default)]
    pub value: Value,
}

impl Answer {
    /// The value as a number, if it was recorded as one.
    pub fn numeric_value(&self) -> Option<f64> {
        match &self.value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

/// The kind of value a question collects.
///
/// Unknown type names are kept verbatim so they round-trip unchanged; they
/// are treated as free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    Numerical,
    SingleChoice,
    Other(String),
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Other(String::new())
    }
}

impl DataType {
    /// True for a question stored without any `dataType`.
    pub fn is_unspecified(&self) -> bool {
        matches!(self, DataType::Other(name) if name.is_empty())
    }

    pub fn as_str(&self) -> &str {
        match self {
            DataType::Numerical => "numerical",
            DataType::SingleChoice => "single_choice",
            DataType::Other(name) => name,
        }
    }
}

impl From<String> for DataType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "numerical" => DataType::Numerical,
            "single_choice" => DataType::SingleChoice,
            _ => DataType::Other(value),
        }
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        match value {
            DataType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Read an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
