pub mod multiple_choice;
pub mod single_choice;

use crate::error::VoteError;
use crate::models::QuestionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The supported question kinds. Each kind's acceptance rule lives in its own
/// module; new kinds (e.g. open-ended) are added as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    SingleChoice,
}

/// Outcome of checking a raw answer against a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Validation {
    Accepted { canonical: String },
    Rejected { reason: Rejection },
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted { .. })
    }

    // Canonical answer, present only when accepted
    pub fn canonical(&self) -> Option<&str> {
        match self {
            Validation::Accepted { canonical } => Some(canonical),
            Validation::Rejected { .. } => None,
        }
    }
}

/// Why an answer was not accepted. Rendering is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    MissingAnswer,
    NotSingleLetter,
    NoMatchingOption,
    UnknownToken,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Rejection::MissingAnswer => "No answer was given.",
            Rejection::NotSingleLetter => "Invalid input format. Please enter a single letter.",
            Rejection::NoMatchingOption | Rejection::UnknownToken => "Invalid answer.",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    kind: QuestionKind,
}

impl Question {
    /// Builds a multiple-choice question. Every option must start with a
    /// distinct `[X]` letter marker.
    pub fn multiple_choice(
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, VoteError> {
        let text = text.into();
        multiple_choice::check_options(&text, &options)?;
        Ok(Self::build(text, options, QuestionKind::MultipleChoice))
    }

    /// Builds a yes/no question answered with `1` or `2`.
    pub fn single_choice(
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, VoteError> {
        let text = text.into();
        single_choice::check_options(&text, &options)?;
        Ok(Self::build(text, options, QuestionKind::SingleChoice))
    }

    fn build(text: String, options: Vec<String>, kind: QuestionKind) -> Self {
        Self {
            id: QuestionId::new(),
            text,
            options,
            kind,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.kind == QuestionKind::MultipleChoice
    }

    /// Checks a raw answer. Pure: nothing is stored on the question.
    pub fn validate(&self, raw: &str) -> Validation {
        match self.kind {
            QuestionKind::MultipleChoice => multiple_choice::validate(&self.options, raw),
            QuestionKind::SingleChoice => single_choice::validate(raw),
        }
    }

    /// The tally key that the option at `index` is counted under.
    pub fn canonical_for_option(&self, index: usize) -> Option<String> {
        let option = self.options.get(index)?;
        match self.kind {
            QuestionKind::MultipleChoice => Some(option.clone()),
            QuestionKind::SingleChoice => single_choice::canonical_for_index(index),
        }
    }

    /// Raw tokens this question accepts, in option order.
    pub fn answer_tokens(&self) -> Vec<String> {
        match self.kind {
            QuestionKind::MultipleChoice => self
                .options
                .iter()
                .filter_map(|option| multiple_choice::marker(option))
                .map(|letter| letter.to_string())
                .collect(),
            QuestionKind::SingleChoice => single_choice::TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }
}
