//! Typed errors for collector transitions and result computation.
//!
//! Scorers themselves never fail. These errors describe actions a front end
//! would normally keep disabled (advancing without a selection, editing a
//! graded answer) and response sets that are not ready for the aggregator.

use thiserror::Error;

use crate::model::Section;

/// A collector transition that is not allowed in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectorError {
    /// "next" or "submit" was requested before anything was selected.
    #[error("no response selected for question {question_id}")]
    NoSelection { question_id: String },

    /// The selected value is not one of the question's options.
    #[error("response {value} is out of range (expected {min}..={max})")]
    OutOfRange { value: usize, min: usize, max: usize },

    /// The answer was already graded; it is locked until the user moves on.
    #[error("question {question_id} is already graded and locked")]
    Locked { question_id: String },

    /// A graded question must be submitted before advancing.
    #[error("question {question_id} has not been submitted")]
    NotSubmitted { question_id: String },

    /// The question set has no questions to present.
    #[error("question set is empty")]
    Empty,

    /// The collector already handed its responses off.
    #[error("section already completed")]
    Completed,
}

/// A response set that cannot be scored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// Some questions of the section have no response.
    #[error("{section} section is incomplete: {answered} of {expected} questions answered")]
    Incomplete {
        section: Section,
        answered: usize,
        expected: usize,
    },

    /// A response refers to a question the bank does not define.
    #[error("{section} section has a response for unknown question {question_id}")]
    UnknownQuestion {
        section: Section,
        question_id: String,
    },

    /// A stored value is outside the section's value domain.
    #[error("{section} response {question_id} = {value} is out of range")]
    InvalidValue {
        section: Section,
        question_id: String,
        value: u8,
    },
}

impl AssessmentError {
    /// The section the error refers to.
    pub fn section(&self) -> Section {
        match self {
            AssessmentError::Incomplete { section, .. }
            | AssessmentError::UnknownQuestion { section, .. }
            | AssessmentError::InvalidValue { section, .. } => *section,
        }
    }
}
