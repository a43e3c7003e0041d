use crate::models::QuestionId;
use std::collections::HashMap;

/// Canonical answer -> number of accepted votes, for one question.
pub type Tally = HashMap<String, u64>;

/// Per-question tallies, iterated in question registration order.
#[derive(Debug, Default)]
pub struct TallyStore {
    order: Vec<QuestionId>,
    tallies: HashMap<QuestionId, Tally>,
}

impl TallyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an empty tally for `id`. An existing tally is cleared but keeps
    /// its position.
    pub fn reset(&mut self, id: QuestionId) {
        if self.tallies.insert(id, Tally::new()).is_none() {
            self.order.push(id);
        }
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.tallies.contains_key(&id)
    }

    /// Adds one vote and returns the new count, or `None` for an unknown
    /// question.
    pub fn increment(&mut self, id: QuestionId, canonical: &str) -> Option<u64> {
        let tally = self.tallies.get_mut(&id)?;
        let count = tally.entry(canonical.to_string()).or_insert(0);
        *count += 1;
        Some(*count)
    }

    pub fn count(&self, id: QuestionId, canonical: &str) -> u64 {
        self.tallies
            .get(&id)
            .and_then(|tally| tally.get(canonical))
            .copied()
            .unwrap_or(0)
    }

    pub fn tally(&self, id: QuestionId) -> Option<&Tally> {
        self.tallies.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &Tally)> {
        self.order
            .iter()
            .filter_map(|id| self.tallies.get(id).map(|tally| (*id, tally)))
    }

    pub fn total(&self) -> u64 {
        self.tallies.values().flat_map(|tally| tally.values()).sum()
    }
}
