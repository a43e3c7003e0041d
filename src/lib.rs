//! Classroom polling engine: validates answers against multiple-choice and
//! yes/no questions and tallies the accepted votes per question and across
//! the whole session.

pub mod config;
pub mod error;
pub mod models;
pub mod questions;
pub mod session;
pub mod voting;

pub use config::{Config, Mode, OutputFormat};
pub use error::{ConfigError, SessionError, VoteError};
pub use models::{Ballot, Participant, QuestionId};
pub use questions::{Question, QuestionKind, Rejection, Validation};
pub use voting::consolidate::{Category, ConsolidatedResults};
pub use voting::{QuestionResults, SubmitOutcome, VoteCount, VotePolicy, VotingService};
