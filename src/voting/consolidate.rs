use crate::voting::tally::TallyStore;
use log::warn;
use serde::Serialize;
use std::fmt;

/// Cross-question buckets: the four choice letters and the two yes/no answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    A,
    B,
    C,
    D,
    True,
    False,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::A,
        Category::B,
        Category::C,
        Category::D,
        Category::True,
        Category::False,
    ];

    /// Reduces a canonical answer to its category: the first character after
    /// an optional leading `[`. `1` is True and `2` is False.
    pub fn from_canonical(canonical: &str) -> Option<Self> {
        let content = canonical.strip_prefix('[').unwrap_or(canonical);
        match content.chars().next()?.to_ascii_uppercase() {
            'A' => Some(Category::A),
            'B' => Some(Category::B),
            'C' => Some(Category::C),
            'D' => Some(Category::D),
            '1' => Some(Category::True),
            '2' => Some(Category::False),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
            Category::D => "D",
            Category::True => "True",
            Category::False => "False",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub votes: u64,
}

/// Vote totals per category across every registered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedResults {
    pub counts: Vec<CategoryCount>,
}

impl ConsolidatedResults {
    fn empty() -> Self {
        Self {
            counts: Category::ALL
                .iter()
                .map(|&category| CategoryCount { category, votes: 0 })
                .collect(),
        }
    }

    pub fn get(&self, category: Category) -> u64 {
        self.counts
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.votes)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.votes).sum()
    }

    fn add(&mut self, category: Category, votes: u64) {
        if let Some(entry) = self.counts.iter_mut().find(|c| c.category == category) {
            entry.votes += votes;
        }
    }
}

pub fn consolidate(tallies: &TallyStore) -> ConsolidatedResults {
    let mut results = ConsolidatedResults::empty();

    for (question_id, tally) in tallies.iter() {
        for (canonical, votes) in tally {
            match Category::from_canonical(canonical) {
                Some(category) => results.add(category, *votes),
                None => warn!(
                    "Skipping {} vote(s) for \"{}\" on question {}: no consolidated category",
                    votes, canonical, question_id
                ),
            }
        }
    }

    results
}
