//! Clinician-readable summary of a form's answer history.
//!
//! Questions are grouped by their `formName` category in first-seen order.
//! Numerical questions show the mean of their answers with a status
//! annotation, single-choice questions show a complaint label, and anything
//! else shows its latest raw value.

use serde_json::Value;

use permanence_core::models::form::{DataType, FormDocument, Question};

use crate::status::{question_status, StatusTier};

/// Wording used by [`render_summary_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLabels {
    pub header: &'static str,
    /// Returned when the form has no questions at all.
    pub no_data: &'static str,
    /// Returned when no question has a recorded answer.
    pub nothing_to_summarize: &'static str,
    pub fallback_category: &'static str,
    pub not_available: &'static str,
    pub numeric_critical: &'static str,
    pub numeric_problematic: &'static str,
    pub numeric_normal: &'static str,
    pub choice_critical: &'static str,
    pub choice_problematic: &'static str,
    pub choice_normal: &'static str,
}

impl SummaryLabels {
    pub fn english() -> Self {
        Self {
            header: "Subj.:",
            no_data: "Form data is missing.",
            nothing_to_summarize: "No questions to summarize.",
            fallback_category: "Other",
            not_available: "N/A",
            numeric_critical: "severe",
            numeric_problematic: "problematic",
            numeric_normal: "within normal limits",
            choice_critical: "severe complaints",
            choice_problematic: "complaints",
            choice_normal: "denies complaints",
        }
    }

    pub fn czech() -> Self {
        Self {
            header: "Subj.:",
            no_data: "Chybí data formuláře.",
            nothing_to_summarize: "Žádné otázky ke shrnutí.",
            fallback_category: "Ostatní",
            not_available: "N/A",
            numeric_critical: "závažný stav",
            numeric_problematic: "problematický stav",
            numeric_normal: "v normě",
            choice_critical: "závažné potíže",
            choice_problematic: "potíže",
            choice_normal: "neguje potíže",
        }
    }

    fn numeric_status(&self, tier: StatusTier) -> &'static str {
        match tier {
            StatusTier::Critical => self.numeric_critical,
            StatusTier::Problematic => self.numeric_problematic,
            StatusTier::Normal => self.numeric_normal,
        }
    }

    fn choice_status(&self, tier: StatusTier) -> &'static str {
        match tier {
            StatusTier::Critical => self.choice_critical,
            StatusTier::Problematic => self.choice_problematic,
            StatusTier::Normal => self.choice_normal,
        }
    }
}

impl Default for SummaryLabels {
    fn default() -> Self {
        Self::english()
    }
}

pub fn render_summary(form: &FormDocument) -> String {
    render_summary_with(form, &SummaryLabels::default())
}

pub fn render_summary_with(form: &FormDocument, labels: &SummaryLabels) -> String {
    let questions = &form.form_template.questions;
    if questions.is_empty() {
        return labels.no_data.to_string();
    }

    let mut categories: Vec<(&str, Vec<String>)> = Vec::new();

    for (idx, question) in questions.iter().enumerate() {
        if question.answers.is_empty() {
            continue;
        }

        let category = question
            .form_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(labels.fallback_category);
        let line = format!("- {}", summary_line(form, idx, question, labels));

        match categories.iter_mut().find(|(name, _)| *name == category) {
            Some((_, lines)) => lines.push(line),
            None => categories.push((category, vec![line])),
        }
    }

    if categories.is_empty() {
        return labels.nothing_to_summarize.to_string();
    }

    let mut output = String::from(labels.header);
    for (category, lines) in &categories {
        output.push_str(&format!("\n\n{category}:\n"));
        output.push_str(&lines.join("\n"));
    }
    output
}

fn summary_line(
    form: &FormDocument,
    idx: usize,
    question: &Question,
    labels: &SummaryLabels,
) -> String {
    let key = humanize_key(&question.key);

    match question.data_type {
        DataType::Numerical => {
            let tier = question_status(form, idx).tier();
            let mean = mean_value(question)
                .map(|m| format!("{m:.1}"))
                .unwrap_or_else(|| labels.not_available.to_string());
            format!("{key}: {mean} ({})", labels.numeric_status(tier))
        }
        DataType::SingleChoice => {
            let tier = question_status(form, idx).tier();
            format!("{key}: {}", labels.choice_status(tier))
        }
        DataType::Other(_) => {
            let latest = match question.answers.last().map(|a| &a.value) {
                Some(Value::Null) | None => Value::String(labels.not_available.to_string()),
                Some(value) => value.clone(),
            };
            format!("{key}: {latest}")
        }
    }
}

/// Mean of the numeric answers, ignoring any recorded as another type.
fn mean_value(question: &Question) -> Option<f64> {
    let values: Vec<f64> = question
        .answers
        .iter()
        .filter_map(|a| a.numeric_value())
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}
