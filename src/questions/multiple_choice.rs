use crate::error::VoteError;
use crate::questions::{Rejection, Validation};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Option labels look like "[A] Python"
    static ref MARKER: Regex = Regex::new(r"^\[([A-Za-z])\]").expect("marker pattern is valid");
}

/// Uppercased letter marker of an option label, if it has one.
pub fn marker(option: &str) -> Option<char> {
    MARKER
        .captures(option)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
}

pub fn check_options(question: &str, options: &[String]) -> Result<(), VoteError> {
    if options.is_empty() {
        return Err(VoteError::NoOptions(question.to_string()));
    }

    let mut seen = HashSet::new();
    for option in options {
        let letter = marker(option).ok_or_else(|| VoteError::MissingMarker {
            question: question.to_string(),
            option: option.clone(),
        })?;
        if !seen.insert(letter) {
            return Err(VoteError::DuplicateMarker {
                question: question.to_string(),
                marker: letter,
            });
        }
    }
    Ok(())
}

pub fn validate(options: &[String], raw: &str) -> Validation {
    // Normalize: "  b " and "B" are the same answer
    let answer = raw.trim().to_uppercase();

    let mut chars = answer.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(letter), None) => letter,
        _ => {
            return Validation::Rejected {
                reason: Rejection::NotSingleLetter,
            }
        }
    };

    // First option whose marker matches wins
    for option in options {
        if marker(option) == Some(letter) {
            return Validation::Accepted {
                canonical: option.clone(),
            };
        }
    }

    Validation::Rejected {
        reason: Rejection::NoMatchingOption,
    }
}
