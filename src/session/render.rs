use crate::config::OutputFormat;
use crate::error::SessionError;
use crate::questions::Rejection;
use crate::voting::consolidate::ConsolidatedResults;
use crate::voting::{QuestionResults, VotePolicy, VotingService};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Everything a JSON consumer needs to redraw both reports.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub policy: VotePolicy,
    pub total_valid_votes: u64,
    pub questions: Vec<QuestionResults>,
    pub consolidated: ConsolidatedResults,
}

impl Report {
    pub fn from_service(service: &VotingService) -> Self {
        Self {
            generated_at: Utc::now(),
            policy: service.policy(),
            total_valid_votes: service.total_valid_votes(),
            questions: service.results(),
            consolidated: service.consolidated_results(),
        }
    }
}

pub fn rejection_message(reason: Rejection, options: &[String]) -> String {
    match reason {
        Rejection::NoMatchingOption | Rejection::UnknownToken => {
            format!("{} Please choose from: {}", reason, options.join(", "))
        }
        Rejection::MissingAnswer | Rejection::NotSingleLetter => reason.to_string(),
    }
}

pub fn write_results<W: Write>(
    service: &VotingService,
    format: OutputFormat,
    output: &mut W,
) -> Result<(), SessionError> {
    match format {
        OutputFormat::Text => {
            write_question_results(&service.results(), output)?;
            write_consolidated(&service.consolidated_results(), output)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *output, &Report::from_service(service))?;
            writeln!(output)?;
        }
    }
    Ok(())
}

pub fn write_question_results<W: Write>(results: &[QuestionResults], output: &mut W) -> Result<(), SessionError> {
    for question in results {
        writeln!(output, "\nVoting Results for: {}", question.question)?;
        for count in &question.counts {
            writeln!(output, "{}: {}", count.option_text, count.votes)?;
        }
    }
    Ok(())
}

pub fn write_consolidated<W: Write>(results: &ConsolidatedResults, output: &mut W) -> Result<(), SessionError> {
    writeln!(output, "\nVoting Results For All iVote Service Questions:")?;
    for count in &results.counts {
        writeln!(output, "[{}]: {}", count.category, count.votes)?;
    }
    Ok(())
}
