//! Error types for soilmate-core

use thiserror::Error;

use crate::quiz::QuestionKind;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while interpreting quiz input or lead details
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown answer for {question}: {value:?}")]
    UnknownAnswer {
        question: QuestionKind,
        value: String,
    },

    #[error("missing answer for {0}")]
    MissingAnswer(QuestionKind),

    #[error("catalog must contain at least one plant")]
    EmptyCatalog,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email format: {0}")]
    InvalidEmail(String),
}
