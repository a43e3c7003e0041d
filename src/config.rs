use crate::error::ConfigError;
use crate::voting::VotePolicy;
use std::env;
use std::str::FromStr;

/// Simulated student ids are five zero-padded digits.
pub const MAX_STUDENT_IDS: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Session settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` means ask on the console.
    pub mode: Option<Mode>,
    pub policy: VotePolicy,
    pub min_participants: u32,
    pub max_participants: u32,
    pub min_attempts: u32,
    pub max_attempts: u32,
    pub output: OutputFormat,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: None,
            policy: VotePolicy::AllowRepeat,
            min_participants: 10,
            max_participants: 50,
            min_attempts: 2,
            max_attempts: 5,
            output: OutputFormat::Text,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mode = match get("IVOTE_MODE") {
            None => None,
            Some(value) => Some(match value.to_lowercase().as_str() {
                "manual" | "1" => Mode::Manual,
                "automatic" | "auto" | "2" => Mode::Automatic,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "IVOTE_MODE",
                        value,
                        reason: "expected manual or automatic",
                    })
                }
            }),
        };

        let policy = match get("IVOTE_ONE_VOTE_PER_PARTICIPANT") {
            None => defaults.policy,
            Some(value) => {
                if parse_bool("IVOTE_ONE_VOTE_PER_PARTICIPANT", value)? {
                    VotePolicy::OncePerParticipant
                } else {
                    VotePolicy::AllowRepeat
                }
            }
        };

        let output = match get("IVOTE_OUTPUT") {
            None => defaults.output,
            Some(value) => match value.to_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "IVOTE_OUTPUT",
                        value,
                        reason: "expected text or json",
                    })
                }
            },
        };

        let config = Config {
            mode,
            policy,
            min_participants: parse_or("IVOTE_MIN_PARTICIPANTS", get("IVOTE_MIN_PARTICIPANTS"), defaults.min_participants)?,
            max_participants: parse_or("IVOTE_MAX_PARTICIPANTS", get("IVOTE_MAX_PARTICIPANTS"), defaults.max_participants)?,
            min_attempts: parse_or("IVOTE_MIN_ATTEMPTS", get("IVOTE_MIN_ATTEMPTS"), defaults.min_attempts)?,
            max_attempts: parse_or("IVOTE_MAX_ATTEMPTS", get("IVOTE_MAX_ATTEMPTS"), defaults.max_attempts)?,
            output,
            seed: get("IVOTE_SEED")
                .map(|value| parse_value("IVOTE_SEED", value))
                .transpose()?,
        };

        config.check_ranges()?;
        Ok(config)
    }

    fn check_ranges(&self) -> Result<(), ConfigError> {
        if self.min_participants > self.max_participants {
            return Err(ConfigError::InvalidRange {
                min_key: "IVOTE_MIN_PARTICIPANTS",
                min: self.min_participants,
                max_key: "IVOTE_MAX_PARTICIPANTS",
                max: self.max_participants,
            });
        }
        if self.min_attempts > self.max_attempts {
            return Err(ConfigError::InvalidRange {
                min_key: "IVOTE_MIN_ATTEMPTS",
                min: self.min_attempts,
                max_key: "IVOTE_MAX_ATTEMPTS",
                max: self.max_attempts,
            });
        }
        if self.max_participants > MAX_STUDENT_IDS {
            return Err(ConfigError::InvalidValue {
                key: "IVOTE_MAX_PARTICIPANTS",
                value: self.max_participants.to_string(),
                reason: "only 100000 five-digit student ids exist",
            });
        }
        if self.min_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "IVOTE_MIN_ATTEMPTS",
                value: "0".to_string(),
                reason: "every simulated student answers at least once",
            });
        }
        Ok(())
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value,
            reason: "expected a boolean",
        }),
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value,
        reason: "expected a non-negative integer",
    })
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    value.map_or(Ok(default), |v| parse_value(key, v))
}
