#![allow(dead_code)]

use permanence_core::models::form::FormDocument;
use serde_json::{json, Value};

/// Answer history with one-day spacing, oldest first.
pub fn history(values: &[Value]) -> Value {
    let answers: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(day, value)| {
            json!({
                "timestamp": format!("2025-03-{:02}T08:00:00Z", day + 1),
                "value": value,
            })
        })
        .collect();
    Value::Array(answers)
}

pub fn form(questions: Value) -> FormDocument {
    serde_json::from_value(json!({
        "name": "Follow-up",
        "formTemplate": {
            "name": "Follow-up",
            "questions": questions,
        },
    }))
    .expect("fixture should deserialize")
}

pub fn numerical(key: &str, problematic: Value, values: &[Value]) -> Value {
    json!({
        "key": key,
        "dataType": "numerical",
        "problematicValues": problematic,
        "answers": history(values),
    })
}
