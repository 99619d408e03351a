//! permanence-rules
//!
//! Answer evaluation and status aggregation for patient forms. Pure and
//! synchronous: every function takes a borrowed form document and returns a
//! fresh result, so evaluating the same or different forms in parallel is safe.

pub mod access;
pub mod deviation;
pub mod error;
pub mod evaluate;
pub mod status;
pub mod summary;

pub use evaluate::{is_critical, is_problematic, try_evaluate, Severity};
pub use status::{form_status, question_status, FormStatus, QuestionStatus, StatusTier};
pub use summary::{render_summary, render_summary_with, SummaryLabels};
