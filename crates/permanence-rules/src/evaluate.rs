use serde::{Deserialize, Serialize};
use serde_json::Value;

use permanence_core::models::form::{Answer, DataType, FormDocument, Question};
use permanence_core::models::rules::{ChoiceRules, DeviationRule, NumericRules};

use crate::access::{resolve, AnswerContext};
use crate::deviation::answer_deviation;
use crate::error::EvaluationError;

/// Which of a question's two rule sets to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Problematic,
    Critical,
}

impl Severity {
    pub fn rule_set_name(self) -> &'static str {
        match self {
            Severity::Problematic => "problematicValues",
            Severity::Critical => "criticalValues",
        }
    }

    pub fn rules(self, question: &Question) -> Option<&Value> {
        let rules = match self {
            Severity::Problematic => question.problematic_values.as_ref(),
            Severity::Critical => question.critical_values.as_ref(),
        };
        rules.filter(|value| !value.is_null())
    }
}

/// Whether the answer at `answer_idx` of question `question_idx` is
/// problematic. Lookup failures and malformed rules report `false`.
pub fn is_problematic(form: &FormDocument, question_idx: usize, answer_idx: usize) -> bool {
    evaluate_or_normal(form, question_idx, answer_idx, Severity::Problematic)
}

/// Whether the answer at `answer_idx` of question `question_idx` is
/// critical. Lookup failures and malformed rules report `false`.
pub fn is_critical(form: &FormDocument, question_idx: usize, answer_idx: usize) -> bool {
    evaluate_or_normal(form, question_idx, answer_idx, Severity::Critical)
}

fn evaluate_or_normal(
    form: &FormDocument,
    question_idx: usize,
    answer_idx: usize,
    severity: Severity,
) -> bool {
    match try_evaluate(form, question_idx, answer_idx, severity) {
        Ok(flagged) => flagged,
        Err(e) => {
            tracing::warn!(
                question = question_idx,
                answer = answer_idx,
                rule_set = severity.rule_set_name(),
                error = %e,
                "answer evaluation failed, reporting as not flagged"
            );
            false
        }
    }
}

/// Evaluate one answer against one rule set, surfacing lookup and rule-shape
/// failures instead of folding them into `false`.
///
/// Numerical answers are flagged when they fall inside the configured range,
/// or (from the second answer on) when their change against the previous
/// answer, or against the first answer from the third answer on, exceeds the
/// configured deviation limits. A malformed `range` or `deviation` part is
/// skipped without disabling the other. Single-choice answers are flagged when their
/// value is one of the listed options. Other data types are never flagged.
pub fn try_evaluate(
    form: &FormDocument,
    question_idx: usize,
    answer_idx: usize,
    severity: Severity,
) -> Result<bool, EvaluationError> {
    let ctx = resolve(form, question_idx, answer_idx)?;
    let Some(rules) = severity.rules(ctx.question) else {
        return Ok(false);
    };
    let key = ctx.question.key.as_str();

    match ctx.question.data_type {
        DataType::Numerical => {
            let Some(current) = ctx.answer.numeric_value() else {
                return Ok(false);
            };
            let (rules, errors) = NumericRules::decode(key, severity.rule_set_name(), rules);
            let mut errors = errors.into_iter();
            if !rules.has_any() {
                if let Some(error) = errors.next() {
                    return Err(error.into());
                }
            }
            for error in errors {
                tracing::warn!(
                    question = question_idx,
                    error = %error,
                    "ignoring malformed rule, evaluating the rest"
                );
            }
            Ok(numeric_flagged(&ctx, answer_idx, current, &rules))
        }
        DataType::SingleChoice => {
            let rules = ChoiceRules::from_value(key, severity.rule_set_name(), rules)?;
            Ok(rules.contains(&ctx.answer.value))
        }
        DataType::Other(_) => Ok(false),
    }
}

fn numeric_flagged(
    ctx: &AnswerContext<'_>,
    answer_idx: usize,
    current: f64,
    rules: &NumericRules,
) -> bool {
    if rules.range.is_some_and(|range| range.matches(current)) {
        return true;
    }

    // The first answer has no history to deviate from.
    if answer_idx == 0 {
        return false;
    }
    let Some(deviation) = rules.deviation else {
        return false;
    };

    if deviation_exceeded(ctx.answer, current, ctx.previous, &deviation) {
        return true;
    }

    // At index 1 the previous answer is the first one; it was checked above.
    answer_idx > 1 && deviation_exceeded(ctx.answer, current, ctx.first(), &deviation)
}

fn deviation_exceeded(
    answer: &Answer,
    current: f64,
    baseline: Option<&Answer>,
    rule: &DeviationRule,
) -> bool {
    match answer_deviation(answer, baseline) {
        Some(d) if d.is_finite() => {
            rule.increase_percent.is_some_and(|limit| d > limit)
                || rule.decrease_percent.is_some_and(|limit| d < -limit)
        }
        // Any rise from a zero baseline counts as unbounded.
        Some(d) if d == f64::INFINITY => rule.increase_percent.is_some() && current > 0.0,
        _ => false,
    }
}
