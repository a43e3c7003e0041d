use crate::models::QuestionId;
use thiserror::Error;

/// Misuse of the voting engine: malformed question configuration or a
/// question handle that was never registered. Rejected answers are not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error("question \"{0}\" has no options")]
    NoOptions(String),

    #[error("single-choice question \"{question}\" needs exactly two options, got {count}")]
    SingleChoiceArity { question: String, count: usize },

    #[error("option \"{option}\" of question \"{question}\" has no [X] letter marker")]
    MissingMarker { question: String, option: String },

    #[error("question \"{question}\" has more than one option marked [{marker}]")]
    DuplicateMarker { question: String, marker: char },

    #[error("unknown question id {0}")]
    UnknownQuestion(QuestionId),
}

/// Bad values in the environment configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: \"{value}\" ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("{min_key} ({min}) must not exceed {max_key} ({max})")]
    InvalidRange {
        min_key: &'static str,
        min: u32,
        max_key: &'static str,
        max: u32,
    },
}

/// Failures of the console driver.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Vote(#[from] VoteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input ended before the session was complete")]
    UnexpectedEof,
}
