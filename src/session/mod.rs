pub mod automatic;
pub mod manual;
pub mod render;

use crate::config::{Config, Mode};
use crate::error::{SessionError, VoteError};
use crate::questions::Question;
use crate::voting::VotingService;
use log::info;
use std::io::{BufRead, Write};

/// One classroom run: the configured questions, the voting service and the
/// settings that decide how answers are gathered.
pub struct VotingSession {
    service: VotingService,
    config: Config,
}

impl VotingSession {
    pub fn new(config: Config) -> Self {
        Self {
            service: VotingService::with_policy(config.policy),
            config,
        }
    }

    /// A session preloaded with the four standard classroom questions.
    pub fn with_default_questions(config: Config) -> Result<Self, VoteError> {
        let mut session = Self::new(config);
        for question in default_questions()? {
            session.service.register_question(question);
        }
        Ok(session)
    }

    pub fn service(&self) -> &VotingService {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut VotingService {
        &mut self.service
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Uses the configured mode, or asks until the user picks 1 or 2.
    pub fn select_mode<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Mode, SessionError> {
        if let Some(mode) = self.config.mode {
            return Ok(mode);
        }

        loop {
            writeln!(output, "Press [1] for manual mode")?;
            writeln!(output, "Press [2] for automatic mode")?;
            output.flush()?;

            match read_line(input)?.trim() {
                "1" => return Ok(Mode::Manual),
                "2" => return Ok(Mode::Automatic),
                _ => writeln!(output, "Invalid mode selection. Please enter 1 or 2.")?,
            }
        }
    }

    /// Gathers answers in the selected mode, then writes both reports.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), SessionError> {
        writeln!(output, "Welcome to the iVote Service!")?;
        writeln!(output, "=============================\n")?;

        let mode = self.select_mode(input, output)?;
        info!("Running session in {:?} mode", mode);

        let participants = match mode {
            Mode::Manual => manual::collect_responses(&mut self.service, input, output)?,
            Mode::Automatic => {
                let mut rng = automatic::rng_for(&self.config);
                automatic::simulate(&mut self.service, &self.config, &mut rng, output)?
            }
        };
        info!(
            "{} participant(s) cast {} valid vote(s)",
            participants,
            self.service.total_valid_votes()
        );

        render::write_results(&self.service, self.config.output, output)?;
        output.flush()?;
        Ok(())
    }
}

pub fn default_questions() -> Result<Vec<Question>, VoteError> {
    let yes_no = || labels(&["[1] for Yes", "[2] for No"]);
    Ok(vec![
        Question::multiple_choice(
            "1.) What are your favorite programming languages?",
            labels(&["[A] Python", "[B] Java", "[C] C++", "[D] Rust"]),
        )?,
        Question::multiple_choice(
            "2.) What is your favorite day?",
            labels(&["[A] Monday", "[B] Tuesday", "[C] Friday", "[D] Saturday"]),
        )?,
        Question::single_choice("3.) Do you take the elevator to class?", yes_no())?,
        Question::single_choice("4.) Is this class CS3560?", yes_no())?,
    ])
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Reads one line without its line terminator. End of input is an error since
/// every prompt needs an answer.
pub(crate) fn read_line<R: BufRead>(input: &mut R) -> Result<String, SessionError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SessionError::UnexpectedEof);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}
