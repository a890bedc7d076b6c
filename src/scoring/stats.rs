use serde::Serialize;

use super::day::RoundScore;

/// Finishing record for one round, counted from numeric placements only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Performance {
    pub wins: u32,
    pub podiums: u32,
    pub top_five: u32,
}

pub fn performance(score: &RoundScore) -> Performance {
    score
        .placements
        .iter()
        .filter_map(|p| p.position())
        .fold(Performance::default(), |mut acc, position| {
            if position == 1 {
                acc.wins += 1;
            }
            if position <= 3 {
                acc.podiums += 1;
            }
            if position <= 5 {
                acc.top_five += 1;
            }
            acc
        })
}
