use serde::Serialize;

use permanence_core::models::form::FormDocument;

use crate::evaluate::{is_critical, is_problematic};

/// Roll-up of every answer recorded for one question.
///
/// The two flags are computed independently: a question with a critical
/// answer still reports whether any answer was problematic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatus {
    pub is_any_critical: bool,
    pub is_any_problematic: bool,
}

impl QuestionStatus {
    pub fn tier(&self) -> StatusTier {
        StatusTier::from_flags(self.is_any_critical, self.is_any_problematic)
    }
}

/// Roll-up of every question in a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStatus {
    pub is_critical: bool,
    pub is_problematic: bool,
}

impl FormStatus {
    pub fn tier(&self) -> StatusTier {
        StatusTier::from_flags(self.is_critical, self.is_problematic)
    }
}

/// Single display tier: critical wins over problematic, which wins over normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTier {
    Critical,
    Problematic,
    Normal,
}

impl StatusTier {
    pub fn from_flags(critical: bool, problematic: bool) -> Self {
        if critical {
            StatusTier::Critical
        } else if problematic {
            StatusTier::Problematic
        } else {
            StatusTier::Normal
        }
    }
}

/// Per-answer flags, for displaying a question's full history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStatus {
    pub index: usize,
    pub timestamp: String,
    pub is_problematic: bool,
    pub is_critical: bool,
}

/// Scan a question's answers for any critical and any problematic one.
/// An out-of-range index reports a normal status.
pub fn question_status(form: &FormDocument, question_idx: usize) -> QuestionStatus {
    let answer_count = form
        .form_template
        .questions
        .get(question_idx)
        .map_or(0, |q| q.answers.len());

    QuestionStatus {
        is_any_critical: (0..answer_count).any(|i| is_critical(form, question_idx, i)),
        is_any_problematic: (0..answer_count).any(|i| is_problematic(form, question_idx, i)),
    }
}

pub fn form_status(form: &FormDocument) -> FormStatus {
    (0..form.form_template.questions.len())
        .map(|i| question_status(form, i))
        .fold(FormStatus::default(), |acc, q| FormStatus {
            is_critical: acc.is_critical || q.is_any_critical,
            is_problematic: acc.is_problematic || q.is_any_problematic,
        })
}

pub fn answer_statuses(form: &FormDocument, question_idx: usize) -> Vec<AnswerStatus> {
    let Some(question) = form.form_template.questions.get(question_idx) else {
        return Vec::new();
    };

    question
        .answers
        .iter()
        .enumerate()
        .map(|(i, answer)| AnswerStatus {
            index: i,
            timestamp: answer.timestamp.to_string(),
            is_problematic: is_problematic(form, question_idx, i),
            is_critical: is_critical(form, question_idx, i),
        })
        .collect()
}
