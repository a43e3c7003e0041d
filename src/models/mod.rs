use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque handle assigned to a question when it is built. Display text plays
/// no part in identity, so two questions with the same prompt stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A student taking part in the session. The answer slot is scratch space:
/// the caller overwrites it right before each submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    answer: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            answer: None,
        }
    }

    // Record the raw answer for the question about to be submitted
    pub fn submit_answer(&mut self, answer: impl Into<String>) {
        self.answer = Some(answer.into());
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }
}

/// One accepted vote, kept in memory for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub participant_id: String,
    pub question_id: QuestionId,
    pub canonical: String,
    pub cast_at: DateTime<Utc>,
}

impl Ballot {
    pub fn new(participant_id: String, question_id: QuestionId, canonical: String) -> Self {
        Self {
            participant_id,
            question_id,
            canonical,
            cast_at: Utc::now(),
        }
    }
}
