//! Error types for the taste-model crate.
//!
//! Quiz input is the only thing in this crate that can be invalid. Every
//! variant here is a precondition failure: callers reject the request before
//! any scoring or network work happens.

use thiserror::Error;

/// Errors raised while validating quiz answers.
///
/// The `#[derive(Error)]` macro from thiserror gives us `Display` and
/// `std::error::Error` from the `#[error(...)]` attributes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Not every question was answered (or too many answers were given)
    #[error("Quiz incomplete: expected {expected} answers but found {found}")]
    Incomplete { expected: usize, found: usize },

    /// An answer points past the four options of its question
    #[error("Answer {index} for question {question} is out of range (options 0-3)")]
    OutOfRange { question: usize, index: usize },

    /// An answer token could not be read as A-D or 0-3
    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, QuizError>;
