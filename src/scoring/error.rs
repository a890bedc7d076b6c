use serde::Serialize;
use thiserror::Error;

/// Fatal input problems. Any of these aborts the whole scoring call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("roster is empty")]
    EmptyRoster,

    #[error("duplicate sail number in roster: {0}")]
    DuplicateSail(String),

    #[error("sail {sail}, race {race}: unrecognized status code '{code}'")]
    InvalidCode {
        sail: String,
        race: usize,
        code: String,
    },

    #[error("sail {sail}, race {race}: finishing position must be between 1 and 9999, got {value}")]
    InvalidPosition { sail: String, race: usize, value: i64 },

    #[error("sail {sail}: round total is too large to score")]
    ScoreOverflow { sail: String },
}

/// Why a results row was left out of the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The sail number could not be matched to anyone on the roster.
    NotInRoster,
    /// More entries than the declared race count.
    TooManyEntries { entries: usize, race_count: usize },
    /// A second row resolved to a competitor who already has results.
    DuplicateResult,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotInRoster => write!(f, "not found in roster"),
            SkipReason::TooManyEntries {
                entries,
                race_count,
            } => write!(f, "{} entries for {} races", entries, race_count),
            SkipReason::DuplicateResult => write!(f, "competitor already has a results row"),
        }
    }
}

/// A results row that was skipped rather than failing the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub sail: String,
    pub reason: SkipReason,
}
