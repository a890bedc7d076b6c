pub mod config;
pub mod day;
pub mod discard;
pub mod entry;
pub mod error;
pub mod penalty;
pub mod rank;
pub mod resolver;
pub mod series;
pub mod stats;
pub mod tiebreak;
pub mod validation;

pub use config::*;
pub use day::{score_round, RoundOutcome, RoundResults, RoundScore, ScoringContext};
pub use discard::{discard_count, select_discards};
pub use entry::{RaceEntry, RawEntry, StatusCode};
pub use error::{ScoringError, SkipReason, Skipped};
pub use penalty::{PenaltyRule, PenaltyTable};
pub use rank::{assign_ranks, rank_standings, Rank, Ranked};
pub use resolver::Resolver;
pub use series::{aggregate, RoundNet, SeriesRound, SeriesStanding};
pub use stats::{performance, Performance};
pub use tiebreak::{compare, sort_standings, Scored};
pub use validation::validate_scoring;
