use permanence_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("question at index {question} not found")]
    QuestionNotFound { question: usize },

    #[error("answer at index {answer} for question {question} not found")]
    AnswerNotFound { question: usize, answer: usize },

    #[error(transparent)]
    MalformedRules(#[from] CoreError),
}
