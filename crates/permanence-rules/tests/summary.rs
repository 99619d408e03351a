mod common;

use common::{form, history, numerical};
use permanence_rules::{render_summary, render_summary_with, SummaryLabels};
use serde_json::json;

#[test]
fn form_without_questions_reports_missing_data() {
    let doc = form(json!([]));
    assert_eq!(render_summary(&doc), "Form data is missing.");

    let missing_template: permanence_core::models::form::FormDocument =
        serde_json::from_value(json!({ "name": "Empty" })).unwrap();
    assert_eq!(render_summary(&missing_template), "Form data is missing.");
}

#[test]
fn form_without_answers_has_nothing_to_summarize() {
    let doc = form(json!([
        numerical("weight", json!({ "range": { "min": 120 } }), &[]),
        { "key": "notes", "dataType": "text" },
    ]));

    assert_eq!(render_summary(&doc), "No questions to summarize.");
}

#[test]
fn groups_by_category_in_first_seen_order() {
    let doc = form(json!([
        {
            "key": "heart_rate",
            "dataType": "numerical",
            "formName": "Vitals",
            "problematicValues": { "range": { "min": 100 } },
            "criticalValues": { "range": { "min": 140 } },
            "answers": history(&[json!(70), json!(80)]),
        },
        {
            "key": "headache",
            "dataType": "single_choice",
            "formName": "Symptoms",
            "problematicValues": ["mild_pain"],
            "criticalValues": ["severe_pain"],
            "answers": history(&[json!("mild_pain")]),
        },
        {
            "key": "body_temperature",
            "dataType": "numerical",
            "formName": "Vitals",
            "problematicValues": { "range": { "min": 37.5 } },
            "criticalValues": { "range": { "min": 39 } },
            "answers": history(&[json!(37.0), json!(39.4)]),
        },
        {
            "key": "patient_notes",
            "dataType": "text",
            "answers": history(&[json!("slept badly"), json!({ "mood": "tired" })]),
        },
        {
            "key": "skipped_question",
            "dataType": "numerical",
            "formName": "Unused",
            "answers": [],
        },
    ]));

    let expected = "Subj.:\n\
        \n\
        Vitals:\n\
        - heart rate: 75.0 (within normal limits)\n\
        - body temperature: 38.2 (severe)\n\
        \n\
        Symptoms:\n\
        - headache: complaints\n\
        \n\
        Other:\n\
        - patient notes: {\"mood\":\"tired\"}";

    assert_eq!(render_summary(&doc), expected);
}

#[test]
fn severe_complaints_for_critical_choice() {
    let doc = form(json!([{
        "key": "headache",
        "dataType": "single_choice",
        "criticalValues": ["severe_pain"],
        "answers": history(&[json!("severe_pain")]),
    }]));

    assert_eq!(render_summary(&doc), "Subj.:\n\nOther:\n- headache: severe complaints");
}

#[test]
fn numeric_mean_ignores_non_numbers_and_marks_missing_mean() {
    let doc = form(json!([
        numerical("weight", json!({ "range": { "min": 120 } }), &[json!(80), json!("n/a"), json!(81)]),
        numerical("height", json!({ "range": { "min": 250 } }), &[json!("unknown")]),
    ]));

    assert_eq!(
        render_summary(&doc),
        "Subj.:\n\nOther:\n- weight: 80.5 (within normal limits)\n- height: N/A (within normal limits)"
    );
}

#[test]
fn problematic_numeric_label() {
    let doc = form(json!([numerical(
        "pain_score",
        json!({ "deviation": { "increasePercent": 50 } }),
        &[json!(10), json!(20)],
    )]));

    assert_eq!(
        render_summary(&doc),
        "Subj.:\n\nOther:\n- pain score: 15.0 (problematic)"
    );
}

#[test]
fn czech_labels() {
    let doc = form(json!([
        numerical("vaha", json!({ "range": { "min": 120 } }), &[json!(80)]),
        {
            "key": "bolest_hlavy",
            "dataType": "single_choice",
            "problematicValues": ["mirna"],
            "answers": history(&[json!("zadna")]),
        },
    ]));

    assert_eq!(
        render_summary_with(&doc, &SummaryLabels::czech()),
        "Subj.:\n\nOstatní:\n- vaha: 80.0 (v normě)\n- bolest hlavy: neguje potíže"
    );
    assert_eq!(
        render_summary_with(&form(json!([])), &SummaryLabels::czech()),
        "Chybí data formuláře."
    );
}

#[test]
fn null_latest_free_text_renders_placeholder() {
    let doc = form(json!([{
        "key": "notes",
        "dataType": "text",
        "answers": history(&[json!("fine"), json!(null)]),
    }]));

    assert_eq!(render_summary(&doc), "Subj.:\n\nOther:\n- notes: \"N/A\"");
}

#[test]
fn rendering_is_repeatable() {
    let doc = form(json!([numerical(
        "pain_score",
        json!({ "deviation": { "increasePercent": 50 } }),
        &[json!(10), json!(20), json!(31)],
    )]));

    assert_eq!(render_summary(&doc), render_summary(&doc));
}

#[test]
fn partially_malformed_form_still_summarizes() {
    let doc: permanence_core::models::form::FormDocument = serde_json::from_value(json!({
        "formTemplate": {
            "questions": [
                {
                    "key": "bp",
                    "dataType": "numerical",
                    "problematicValues": {
                        "range": { "min": "90" },
                        "deviation": { "increasePercent": 10 },
                    },
                    "answers": history(&[json!(50), json!(80)]),
                },
                { "key": "weight", "dataType": "numerical", "answers": null },
                { "key": "notes", "answers": [{ "timestamp": "2025-03-01T08:00:00Z" }] },
            ],
        },
    }))
    .unwrap();

    assert_eq!(
        render_summary(&doc),
        "Subj.:\n\nOther:\n- bp: 65.0 (problematic)\n- notes: \"N/A\""
    );
}
