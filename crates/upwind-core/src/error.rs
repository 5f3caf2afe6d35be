//! Quiz engine error types.
//!
//! Every failure in this crate's engine is local and recoverable by the
//! caller. The presentation layer decides whether to re-prompt, refuse to
//! start a quiz, or report an integration bug.

use thiserror::Error;

/// Errors returned by the quiz session engine and question constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The pool holds fewer questions than the quiz asks for.
    #[error("question pool has {available} questions, but {requested} were requested")]
    InsufficientPool { available: usize, requested: usize },

    /// A quiz must ask at least one question.
    #[error("a quiz needs at least one question")]
    EmptyQuiz,

    /// No answer was selected for the current question.
    #[error("please select an answer before proceeding")]
    NoSelection,

    /// The answer is not one of the current question's options.
    #[error("'{0}' is not one of the options for this question")]
    InvalidAnswer(String),

    /// The session has already presented its last question.
    #[error("the quiz session is already complete")]
    SessionComplete,

    /// A question violates the four-distinct-options invariant.
    #[error("malformed question '{prompt}': {reason}")]
    MalformedQuestion { prompt: String, reason: String },
}

impl QuizError {
    /// Returns `true` for both flavours of invalid answer: nothing selected,
    /// or a selection that is not among the options. The caller should
    /// prompt the user again.
    pub fn is_invalid_answer(&self) -> bool {
        matches!(self, QuizError::NoSelection | QuizError::InvalidAnswer(_))
    }
}
