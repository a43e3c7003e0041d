pub mod consolidate;
pub mod tally;

use crate::error::VoteError;
use crate::models::{Ballot, Participant, QuestionId};
use crate::questions::{Question, QuestionKind, Rejection, Validation};
use consolidate::ConsolidatedResults;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tally::TallyStore;

/// Whether a participant may vote more than once on the same question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotePolicy {
    /// Every accepted submission counts, including repeats.
    #[default]
    AllowRepeat,
    /// Only the first accepted submission per (participant, question) counts.
    OncePerParticipant,
}

// Result of a single vote submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Accepted {
        canonical: String,
    },
    Rejected {
        reason: Rejection,
        valid_options: Vec<String>,
    },
    AlreadyVoted,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }
}

// Vote count for one declared option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteCount {
    pub option_text: String,
    pub canonical: String,
    pub votes: u64,
}

// Results for one question, options in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResults {
    pub question_id: QuestionId,
    pub question: String,
    pub kind: QuestionKind,
    pub counts: Vec<VoteCount>,
}

impl QuestionResults {
    /// Count for an option, looked up by its declared label or its canonical
    /// answer. Unknown labels count as zero.
    pub fn count(&self, label: &str) -> u64 {
        self.counts
            .iter()
            .find(|c| c.option_text == label || c.canonical == label)
            .map_or(0, |c| c.votes)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.votes).sum()
    }
}

/// Registers questions, records validated votes and reports the tallies.
///
/// Single-threaded: the tally store is only reachable through `&mut self`.
#[derive(Debug, Default)]
pub struct VotingService {
    questions: Vec<Question>,
    tallies: TallyStore,
    policy: VotePolicy,
    voted: HashSet<(String, QuestionId)>,
    ballots: Vec<Ballot>,
}

impl VotingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: VotePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> VotePolicy {
        self.policy
    }

    /// Adds a question with an empty tally. Registering the same question
    /// again replaces it in place and discards its votes.
    pub fn register_question(&mut self, question: Question) -> QuestionId {
        let id = question.id();

        match self.questions.iter().position(|q| q.id() == id) {
            Some(index) => {
                warn!(
                    "Question {} (\"{}\") registered twice; its tally has been reset",
                    id,
                    question.text()
                );
                self.questions[index] = question;
                self.voted.retain(|(_, question_id)| *question_id != id);
                self.ballots.retain(|ballot| ballot.question_id != id);
            }
            None => {
                info!("Registered question {}: {}", id, question.text());
                self.questions.push(question);
            }
        }

        self.tallies.reset(id);
        id
    }

    /// Validates the participant's current answer and counts it if accepted.
    ///
    /// Under [`VotePolicy::AllowRepeat`] this is not idempotent: submitting
    /// the same valid answer twice counts twice.
    pub fn submit_vote(
        &mut self,
        participant: &Participant,
        question_id: QuestionId,
    ) -> Result<SubmitOutcome, VoteError> {
        let question = self
            .question(question_id)
            .ok_or(VoteError::UnknownQuestion(question_id))?;

        let voter_key = (participant.id.clone(), question_id);
        if self.policy == VotePolicy::OncePerParticipant && self.voted.contains(&voter_key) {
            warn!(
                "Participant {} already voted on question {}; submission ignored",
                participant.id, question_id
            );
            return Ok(SubmitOutcome::AlreadyVoted);
        }

        let validation = match participant.answer() {
            Some(raw) => question.validate(raw),
            None => Validation::Rejected {
                reason: Rejection::MissingAnswer,
            },
        };

        let canonical = match validation {
            Validation::Accepted { canonical } => canonical,
            Validation::Rejected { reason } => {
                debug!(
                    "Rejected answer {:?} from {} on question {}: {:?}",
                    participant.answer(),
                    participant.id,
                    question_id,
                    reason
                );
                return Ok(SubmitOutcome::Rejected {
                    reason,
                    valid_options: question.options().to_vec(),
                });
            }
        };

        self.tallies
            .increment(question_id, &canonical)
            .ok_or(VoteError::UnknownQuestion(question_id))?;
        self.voted.insert(voter_key);
        self.ballots.push(Ballot::new(
            participant.id.clone(),
            question_id,
            canonical.clone(),
        ));
        debug!(
            "Counted \"{}\" from {} on question {}",
            canonical, participant.id, question_id
        );

        Ok(SubmitOutcome::Accepted { canonical })
    }

    /// Per-question results in registration order. Every declared option is
    /// listed, including those with no votes.
    pub fn results(&self) -> Vec<QuestionResults> {
        self.questions
            .iter()
            .map(|question| self.build_results(question))
            .collect()
    }

    pub fn results_for(&self, question_id: QuestionId) -> Option<QuestionResults> {
        self.question(question_id).map(|q| self.build_results(q))
    }

    pub fn consolidated_results(&self) -> ConsolidatedResults {
        consolidate::consolidate(&self.tallies)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, question_id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == question_id)
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn total_valid_votes(&self) -> u64 {
        self.tallies.total()
    }

    fn build_results(&self, question: &Question) -> QuestionResults {
        let counts = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let canonical = question
                    .canonical_for_option(index)
                    .unwrap_or_else(|| option.clone());
                VoteCount {
                    option_text: option.clone(),
                    votes: self.tallies.count(question.id(), &canonical),
                    canonical,
                }
            })
            .collect();

        QuestionResults {
            question_id: question.id(),
            question: question.text().to_string(),
            kind: question.kind(),
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::consolidate::Category;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn vote(service: &mut VotingService, who: &str, question: QuestionId, raw: &str) -> SubmitOutcome {
        let mut student = Participant::new(who);
        student.submit_answer(raw);
        service.submit_vote(&student, question).unwrap()
    }

    #[test]
    fn test_rejected_votes_do_not_mutate() {
        let mut service = VotingService::new();
        let q = service.register_question(
            Question::multiple_choice("Lang?", labels(&["[A] Python", "[B] Java"])).unwrap(),
        );

        let outcome = vote(&mut service, "1", q, "c");
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                reason: Rejection::NoMatchingOption,
                valid_options: labels(&["[A] Python", "[B] Java"]),
            }
        );
        assert_eq!(service.total_valid_votes(), 0);
        assert!(service.ballots().is_empty());
    }

    #[test]
    fn test_missing_answer_is_rejected() {
        let mut service = VotingService::new();
        let q = service.register_question(
            Question::single_choice("Yes?", labels(&["[1] for Yes", "[2] for No"])).unwrap(),
        );

        let outcome = service.submit_vote(&Participant::new("1"), q).unwrap();
        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected {
                reason: Rejection::MissingAnswer,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_question_is_an_error() {
        let mut service = VotingService::new();
        let stray = QuestionId::new();
        let mut student = Participant::new("1");
        student.submit_answer("A");

        assert_eq!(
            service.submit_vote(&student, stray),
            Err(VoteError::UnknownQuestion(stray))
        );
        assert!(service.results_for(stray).is_none());
    }

    #[test]
    fn test_once_per_participant_policy() {
        let mut service = VotingService::with_policy(VotePolicy::OncePerParticipant);
        let q = service.register_question(
            Question::single_choice("Yes?", labels(&["[1] for Yes", "[2] for No"])).unwrap(),
        );

        // A rejected attempt does not use up the participant's vote
        assert!(!vote(&mut service, "s1", q, "yes").is_accepted());
        assert!(vote(&mut service, "s1", q, "1").is_accepted());
        assert_eq!(vote(&mut service, "s1", q, "2"), SubmitOutcome::AlreadyVoted);
        assert!(vote(&mut service, "s2", q, "2").is_accepted());

        let results = service.results_for(q).unwrap();
        assert_eq!(results.count("[1] for Yes"), 1);
        assert_eq!(results.count("[2] for No"), 1);
    }

    #[test]
    fn test_results_list_every_option_in_order() {
        let mut service = VotingService::new();
        let q = service.register_question(
            Question::multiple_choice("Day?", labels(&["[A] Mon", "[B] Tue", "[C] Fri"])).unwrap(),
        );
        vote(&mut service, "1", q, "c");

        let results = service.results_for(q).unwrap();
        let listed: Vec<(&str, u64)> = results
            .counts
            .iter()
            .map(|c| (c.option_text.as_str(), c.votes))
            .collect();
        assert_eq!(listed, vec![("[A] Mon", 0), ("[B] Tue", 0), ("[C] Fri", 1)]);
    }

    #[test]
    fn test_single_choice_results_follow_fixed_labels() {
        let mut service = VotingService::new();
        let q = service.register_question(
            Question::single_choice("Coffee?", labels(&["Sure", "Never"])).unwrap(),
        );
        vote(&mut service, "1", q, "1");

        let results = service.results_for(q).unwrap();
        assert_eq!(results.count("Sure"), 1);
        assert_eq!(results.count("[1] for Yes"), 1);
        assert_eq!(results.count("Never"), 0);
    }

    #[test]
    fn test_questions_with_same_text_stay_separate() {
        let mut service = VotingService::new();
        let options = labels(&["[1] for Yes", "[2] for No"]);
        let first = service.register_question(Question::single_choice("Same?", options.clone()).unwrap());
        let second = service.register_question(Question::single_choice("Same?", options).unwrap());
        vote(&mut service, "1", first, "1");

        assert_eq!(service.results_for(first).unwrap().total(), 1);
        assert_eq!(service.results_for(second).unwrap().total(), 0);
        assert_eq!(service.results().len(), 2);
    }

    #[test]
    fn test_reregistration_resets_tally() {
        let mut service = VotingService::with_policy(VotePolicy::OncePerParticipant);
        let question =
            Question::multiple_choice("Lang?", labels(&["[A] Python", "[B] Java"])).unwrap();
        let q = service.register_question(question.clone());
        vote(&mut service, "s1", q, "a");

        assert_eq!(service.register_question(question), q);
        assert_eq!(service.questions().len(), 1);
        assert_eq!(service.total_valid_votes(), 0);
        assert!(service.ballots().is_empty());
        // The participant may vote again after the reset
        assert!(vote(&mut service, "s1", q, "a").is_accepted());
    }

    #[test]
    fn test_ballots_record_accepted_votes() {
        let mut service = VotingService::new();
        let q = service.register_question(
            Question::multiple_choice("Lang?", labels(&["[A] Python", "[B] Java"])).unwrap(),
        );
        vote(&mut service, "s1", q, " b ");
        vote(&mut service, "s2", q, "x");

        let ballots = service.ballots();
        assert_eq!(ballots.len(), 1);
        assert_eq!(ballots[0].participant_id, "s1");
        assert_eq!(ballots[0].question_id, q);
        assert_eq!(ballots[0].canonical, "[B] Java");
    }

    #[test]
    fn test_consolidated_results_match_total_votes() {
        let mut service = VotingService::new();
        let mc = service.register_question(
            Question::multiple_choice("Lang?", labels(&["[A] Python", "[B] Java", "[C] C++", "[D] Rust"])).unwrap(),
        );
        let sc = service.register_question(
            Question::single_choice("Yes?", labels(&["[1] for Yes", "[2] for No"])).unwrap(),
        );
        for raw in ["a", "d", "d", "q"] {
            vote(&mut service, "s", mc, raw);
        }
        for raw in ["2", "2", "1", "maybe"] {
            vote(&mut service, "s", sc, raw);
        }

        let consolidated = service.consolidated_results();
        assert_eq!(consolidated.get(Category::D), 2);
        assert_eq!(consolidated.get(Category::False), 2);
        assert_eq!(consolidated.total(), service.total_valid_votes());
        assert_eq!(consolidated.total(), 6);
    }
}
