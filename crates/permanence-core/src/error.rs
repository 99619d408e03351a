use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed {rule_set} rules on question '{key}': {reason}")]
    MalformedRules {
        key: String,
        rule_set: &'static str,
        reason: String,
    },
}
