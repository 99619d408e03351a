use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_USER: &str = "Unknown user";

/// The persisted per-installation config object.
///
/// Only `user` is interpreted; any other keys written by the desktop shell
/// are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            extra: Map::new(),
        }
    }
}

impl UserConfig {
    /// Overlay the keys of a stored JSON object onto the defaults.
    ///
    /// Non-object input, or a `user` that is not a string, falls back to the
    /// default for the affected keys.
    pub fn merged_with_defaults(stored: Value) -> Self {
        let mut config = Self::default();
        let Value::Object(object) = stored else {
            return config;
        };
        for (key, value) in object {
            if key == "user" {
                if let Value::String(user) = value {
                    config.user = user;
                }
            } else {
                config.extra.insert(key, value);
            }
        }
        config
    }
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}
