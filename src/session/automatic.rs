use crate::config::{Config, MAX_STUDENT_IDS};
use crate::error::SessionError;
use crate::models::Participant;
use crate::questions::Question;
use crate::voting::VotingService;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::io::Write;

pub fn rng_for(config: &Config) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Simulates a class: a random number of students, each trying several
/// random answers per question. Only the last valid attempt per question is
/// submitted. Returns the number of students.
pub fn simulate<R: Rng, W: Write>(
    service: &mut VotingService,
    config: &Config,
    rng: &mut R,
    output: &mut W,
) -> Result<usize, SessionError> {
    let student_count = rng.gen_range(config.min_participants..=config.max_participants) as usize;
    writeln!(output, "Number of students participating: {}", student_count)?;
    info!("Simulating {} students", student_count);

    let questions: Vec<Question> = service.questions().to_vec();
    let mut students = generate_students(student_count, rng);

    for student in &mut students {
        for question in &questions {
            let attempts = rng.gen_range(config.min_attempts..=config.max_attempts);
            let mut last_valid = None;

            for _ in 0..attempts {
                if let Some(answer) = random_answer(question, rng) {
                    if question.validate(&answer).is_accepted() {
                        last_valid = Some(answer);
                    }
                }
            }

            if let Some(answer) = last_valid {
                debug!("Student {} settles on {:?} for {}", student.id, answer, question.id());
                student.submit_answer(answer);
                service.submit_vote(student, question.id())?;
            }
        }
    }

    Ok(student_count)
}

// Five-digit ids, redrawn on collision
fn generate_students<R: Rng>(count: usize, rng: &mut R) -> Vec<Participant> {
    let mut seen = HashSet::new();
    let mut students = Vec::with_capacity(count);

    while students.len() < count.min(MAX_STUDENT_IDS as usize) {
        let id = format!("{:05}", rng.gen_range(0..MAX_STUDENT_IDS));
        if seen.insert(id.clone()) {
            students.push(Participant::new(id));
        }
    }
    students
}

/// A uniformly random token the question accepts.
pub fn random_answer<R: Rng>(question: &Question, rng: &mut R) -> Option<String> {
    question.answer_tokens().choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::default_questions;

    fn small_config() -> Config {
        Config {
            min_participants: 5,
            max_participants: 8,
            seed: Some(99),
            ..Config::default()
        }
    }

    fn service_with_defaults() -> VotingService {
        let mut service = VotingService::new();
        for question in default_questions().unwrap() {
            service.register_question(question);
        }
        service
    }

    #[test]
    fn test_every_student_votes_once_per_question() {
        let config = small_config();
        let mut service = service_with_defaults();
        let mut rng = rng_for(&config);

        let count = simulate(&mut service, &config, &mut rng, &mut Vec::new()).unwrap();

        assert!((5..=8).contains(&count));
        assert_eq!(service.total_valid_votes(), (count * 4) as u64);
        for results in service.results() {
            assert_eq!(results.total(), count as u64);
        }
        assert_eq!(service.consolidated_results().total(), service.total_valid_votes());
    }

    #[test]
    fn test_same_seed_gives_same_tallies() {
        let config = small_config();
        let run = || {
            let mut service = service_with_defaults();
            simulate(&mut service, &config, &mut rng_for(&config), &mut Vec::new()).unwrap();
            service.consolidated_results()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_student_ids_are_unique_and_padded() {
        let mut rng = StdRng::seed_from_u64(1);
        let students = generate_students(200, &mut rng);

        let ids: HashSet<&str> = students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 200);
        assert!(students.iter().all(|s| s.id.len() == 5 && s.id.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn test_random_answers_are_always_valid() {
        let mut rng = StdRng::seed_from_u64(3);
        for question in default_questions().unwrap() {
            for _ in 0..50 {
                let answer = random_answer(&question, &mut rng).unwrap();
                assert!(question.validate(&answer).is_accepted(), "{} for {}", answer, question.text());
            }
        }
    }
}
