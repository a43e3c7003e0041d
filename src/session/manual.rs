use crate::error::SessionError;
use crate::models::Participant;
use crate::questions::{Question, Validation};
use crate::session::{read_line, render};
use crate::voting::{SubmitOutcome, VotingService};
use log::{info, warn};
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// Console-driven collection: asks for the class size, a unique id per
/// student, then one answer per question, re-prompting until it validates.
/// Returns the number of students who took part.
pub fn collect_responses<R: BufRead, W: Write>(
    service: &mut VotingService,
    input: &mut R,
    output: &mut W,
) -> Result<usize, SessionError> {
    let student_count = prompt_student_count(input, output)?;
    let questions: Vec<Question> = service.questions().to_vec();
    let mut used_ids = HashSet::new();

    for _ in 0..student_count {
        let student_id = prompt_student_id(&used_ids, input, output)?;
        used_ids.insert(student_id.clone());
        let mut student = Participant::new(student_id);

        for question in &questions {
            let answer = prompt_answer(question, input, output)?;
            student.submit_answer(answer);

            match service.submit_vote(&student, question.id())? {
                SubmitOutcome::Accepted { canonical } => {
                    info!("Student {} answered {}", student.id, canonical)
                }
                SubmitOutcome::AlreadyVoted => {
                    writeln!(output, "Student {} has already answered this question.", student.id)?
                }
                SubmitOutcome::Rejected { reason, .. } => {
                    // The answer was validated above, so this only happens if
                    // the question changed underneath us
                    warn!("Answer from {} rejected after validation: {:?}", student.id, reason)
                }
            }
        }
    }

    Ok(student_count)
}

fn prompt_student_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<usize, SessionError> {
    loop {
        write!(output, "How many students are using the iVote service? ")?;
        output.flush()?;
        match read_line(input)?.trim().parse::<usize>() {
            Ok(count) => return Ok(count),
            Err(_) => writeln!(output, "Please enter a whole number of students.")?,
        }
    }
}

fn prompt_student_id<R: BufRead, W: Write>(
    used_ids: &HashSet<String>,
    input: &mut R,
    output: &mut W,
) -> Result<String, SessionError> {
    loop {
        write!(output, "Enter student ID: ")?;
        output.flush()?;
        let student_id = read_line(input)?.trim().to_string();

        if student_id.is_empty() {
            writeln!(output, "Student ID cannot be empty.")?;
        } else if used_ids.contains(&student_id) {
            writeln!(output, "This student ID has already been used. Please enter a unique ID.")?;
        } else {
            return Ok(student_id);
        }
    }
}

fn prompt_answer<R: BufRead, W: Write>(
    question: &Question,
    input: &mut R,
    output: &mut W,
) -> Result<String, SessionError> {
    loop {
        writeln!(output, "{}", question.text())?;
        writeln!(output, "Choose an answer from: {}", question.options().join(", "))?;
        output.flush()?;

        let answer = read_line(input)?;
        match question.validate(&answer) {
            Validation::Accepted { .. } => return Ok(answer),
            Validation::Rejected { reason } => {
                writeln!(output, "{}", render::rejection_message(reason, question.options()))?
            }
        }
    }
}
