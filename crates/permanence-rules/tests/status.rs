mod common;

use common::{form, history, numerical};
use permanence_rules::status::answer_statuses;
use permanence_rules::{form_status, question_status, FormStatus, QuestionStatus, StatusTier};
use serde_json::json;

#[test]
fn critical_and_problematic_flags_are_independent() {
    let doc = form(json!([{
        "key": "systolic_pressure",
        "dataType": "numerical",
        "problematicValues": { "range": { "min": 140, "max": 179 } },
        "criticalValues": { "range": { "min": 180 } },
        "answers": history(&[json!(190), json!(150)]),
    }]));

    let status = question_status(&doc, 0);
    assert_eq!(
        status,
        QuestionStatus {
            is_any_critical: true,
            is_any_problematic: true,
        }
    );
    assert_eq!(status.tier(), StatusTier::Critical);
}

#[test]
fn critical_only_question_is_not_problematic() {
    let doc = form(json!([{
        "key": "headache",
        "dataType": "single_choice",
        "criticalValues": ["severe_pain"],
        "answers": history(&[json!("severe_pain")]),
    }]));

    let status = question_status(&doc, 0);
    assert!(status.is_any_critical);
    assert!(!status.is_any_problematic);
}

#[test]
fn question_without_answers_or_out_of_range_is_normal() {
    let doc = form(json!([numerical("weight", json!({ "range": { "min": 0 } }), &[])]));

    assert_eq!(question_status(&doc, 0), QuestionStatus::default());
    assert_eq!(question_status(&doc, 9), QuestionStatus::default());
    assert_eq!(question_status(&doc, 0).tier(), StatusTier::Normal);
}

#[test]
fn form_status_unions_every_question() {
    let doc = form(json!([
        numerical("weight", json!({ "range": { "min": 120 } }), &[json!(80)]),
        numerical("temperature", json!({ "range": { "min": 38 } }), &[json!(36.5), json!(38.2)]),
        {
            "key": "headache",
            "dataType": "single_choice",
            "criticalValues": ["severe_pain"],
            "answers": history(&[json!("none")]),
        },
    ]));

    let status = form_status(&doc);
    assert_eq!(
        status,
        FormStatus {
            is_critical: false,
            is_problematic: true,
        }
    );
    assert_eq!(status.tier(), StatusTier::Problematic);
}

#[test]
fn empty_form_is_normal() {
    let doc = form(json!([]));
    assert_eq!(form_status(&doc), FormStatus::default());
}

#[test]
fn answer_statuses_cover_the_whole_history() {
    let doc = form(json!([numerical(
        "pain_score",
        json!({ "deviation": { "increasePercent": 50 } }),
        &[json!(10), json!(12), json!(31)],
    )]));

    let flags: Vec<bool> = answer_statuses(&doc, 0)
        .iter()
        .map(|s| s.is_problematic)
        .collect();
    assert_eq!(flags, vec![false, false, true]);
    assert!(answer_statuses(&doc, 4).is_empty());
}
