use crate::error::VoteError;
use crate::questions::{Rejection, Validation};

/// Canonical answer for token `1`, whatever the option text says.
pub const YES_LABEL: &str = "[1] for Yes";
/// Canonical answer for token `2`.
pub const NO_LABEL: &str = "[2] for No";

pub const TOKENS: [&str; 2] = ["1", "2"];

pub fn check_options(question: &str, options: &[String]) -> Result<(), VoteError> {
    if options.is_empty() {
        return Err(VoteError::NoOptions(question.to_string()));
    }
    if options.len() != 2 {
        return Err(VoteError::SingleChoiceArity {
            question: question.to_string(),
            count: options.len(),
        });
    }
    Ok(())
}

// Exact tokens only; no trimming or case folding
pub fn validate(raw: &str) -> Validation {
    match raw {
        "1" => Validation::Accepted {
            canonical: YES_LABEL.to_string(),
        },
        "2" => Validation::Accepted {
            canonical: NO_LABEL.to_string(),
        },
        _ => Validation::Rejected {
            reason: Rejection::UnknownToken,
        },
    }
}

pub fn canonical_for_index(index: usize) -> Option<String> {
    match index {
        0 => Some(YES_LABEL.to_string()),
        1 => Some(NO_LABEL.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_tokens_accept() {
        assert_eq!(validate("1").canonical(), Some(YES_LABEL));
        assert_eq!(validate("2").canonical(), Some(NO_LABEL));

        for raw in ["yes", "0", "3", " 1", "1 ", "", "12"] {
            assert_eq!(
                validate(raw),
                Validation::Rejected {
                    reason: Rejection::UnknownToken
                },
                "answer {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_requires_exactly_two_options() {
        assert!(check_options("Q", &["Yes".to_string(), "No".to_string()]).is_ok());
        assert_eq!(
            check_options("Q", &[]),
            Err(VoteError::NoOptions("Q".to_string()))
        );
        assert_eq!(
            check_options("Q", &["Yes".to_string()]),
            Err(VoteError::SingleChoiceArity {
                question: "Q".to_string(),
                count: 1
            })
        );
        assert_eq!(
            check_options(
                "Q",
                &["Yes".to_string(), "No".to_string(), "Maybe".to_string()]
            ),
            Err(VoteError::SingleChoiceArity {
                question: "Q".to_string(),
                count: 3
            })
        );
    }
}
