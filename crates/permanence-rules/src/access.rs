use permanence_core::models::form::{Answer, FormDocument, Question};

use crate::error::EvaluationError;

/// Everything the evaluator needs about one answer.
#[derive(Debug, Clone, Copy)]
pub struct AnswerContext<'a> {
    pub question: &'a Question,
    pub answer: &'a Answer,
    /// The answer recorded immediately before, if any.
    pub previous: Option<&'a Answer>,
    /// The question's full history, oldest first.
    pub answers: &'a [Answer],
}

impl<'a> AnswerContext<'a> {
    pub fn first(&self) -> Option<&'a Answer> {
        self.answers.first()
    }
}

/// Look up a question and one of its answers by position.
pub fn resolve(
    form: &FormDocument,
    question_idx: usize,
    answer_idx: usize,
) -> Result<AnswerContext<'_>, EvaluationError> {
    let question = form
        .form_template
        .questions
        .get(question_idx)
        .ok_or(EvaluationError::QuestionNotFound {
            question: question_idx,
        })?;

    let answers = question.answers.as_slice();
    let answer = answers
        .get(answer_idx)
        .ok_or(EvaluationError::AnswerNotFound {
            question: question_idx,
            answer: answer_idx,
        })?;

    let previous = answer_idx.checked_sub(1).and_then(|i| answers.get(i));

    Ok(AnswerContext {
        question,
        answer,
        previous,
        answers,
    })
}
