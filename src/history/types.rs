use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{aggregate, RoundOutcome, SeriesRound, SeriesStanding};

/// Every round recorded for a series, plus the next round number to hand out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundHistory {
    pub version: u32,
    pub next_round: u32,
    #[serde(default)]
    pub rounds: Vec<RoundRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub event_id: String,
    pub round_number: u32,
    pub regatta: Option<String>,
    pub class: Option<String>,
    pub date: Option<NaiveDate>,
    pub race_count: usize,
    pub processed_at: DateTime<Utc>,
    pub note: Option<String>,
    pub results: SeriesRound,
}

/// Descriptive details of a round, supplied by whoever entered the results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundInfo {
    pub event_id: String,
    pub regatta: Option<String>,
    pub class: Option<String>,
    pub date: Option<NaiveDate>,
}

/// What `record_round` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    New(u32),
    /// The event was already recorded; its round was replaced in place
    Corrected(u32),
}

impl Recorded {
    pub fn round_number(&self) -> u32 {
        match self {
            Recorded::New(n) | Recorded::Corrected(n) => *n,
        }
    }
}

impl Default for RoundHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundHistory {
    /// Create a new empty history with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            next_round: 1,
            rounds: Vec::new(),
        }
    }

    pub fn find(&self, event_id: &str) -> Option<&RoundRecord> {
        self.rounds.iter().find(|r| r.event_id == event_id)
    }

    /// Store a scored round. See [`RoundHistory::record_round_at`].
    pub fn record_round(&mut self, info: RoundInfo, outcome: &RoundOutcome) -> Recorded {
        self.record_round_at(info, outcome, Utc::now())
    }

    /// Store a scored round as of `now`.
    ///
    /// A new event id takes the next round number. A known event id is a
    /// correction: the old record is replaced wholesale, keeps its round
    /// number and gets a "Re-processed" note.
    pub fn record_round_at(
        &mut self,
        info: RoundInfo,
        outcome: &RoundOutcome,
        now: DateTime<Utc>,
    ) -> Recorded {
        let existing = self.rounds.iter().position(|r| r.event_id == info.event_id);

        let (round_number, note) = match existing {
            Some(idx) => {
                let previous = &self.rounds[idx];
                let stamp = format!("Re-processed {}", now.format("%Y-%m-%d"));
                let note = match &previous.note {
                    Some(n) => format!("{} | {}", n, stamp),
                    None => stamp,
                };
                (previous.round_number, Some(note))
            }
            None => {
                let n = self.next_round;
                self.next_round += 1;
                (n, None)
            }
        };

        let record = RoundRecord {
            event_id: info.event_id,
            round_number,
            regatta: info.regatta,
            class: info.class,
            date: info.date,
            race_count: outcome.race_count,
            processed_at: now,
            note,
            results: SeriesRound::from_outcome(outcome),
        };

        match existing {
            Some(idx) => {
                self.rounds[idx] = record;
                Recorded::Corrected(round_number)
            }
            None => {
                self.rounds.push(record);
                Recorded::New(round_number)
            }
        }
    }

    /// Records sorted by round number.
    pub fn rounds_in_order(&self) -> Vec<&RoundRecord> {
        let mut rounds: Vec<&RoundRecord> = self.rounds.iter().collect();
        rounds.sort_by_key(|r| r.round_number);
        rounds
    }

    /// Recompute the whole series from the stored rounds.
    pub fn standings(&self) -> Vec<SeriesStanding> {
        let rounds: Vec<SeriesRound> = self
            .rounds_in_order()
            .into_iter()
            .map(|r| r.results.clone())
            .collect();
        aggregate(&rounds)
    }
}
