use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::discard::{discarded_sum, select_discards};
use super::entry::{RaceEntry, RawEntry};
use super::error::{ScoringError, SkipReason, Skipped};
use super::penalty::PenaltyTable;
use super::rank::{rank_standings, Rank, Ranked};
use super::resolver::{absent_entry, race_average, Resolver};
use super::tiebreak::Scored;
use crate::roster::{Competitor, Roster};

/// Master data for one scoring batch. The caller decides how long it lives;
/// nothing in the engine caches it.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub roster: &'a Roster,
    pub penalties: &'a PenaltyTable,
}

impl<'a> ScoringContext<'a> {
    pub fn new(roster: &'a Roster, penalties: &'a PenaltyTable) -> Self {
        Self { roster, penalties }
    }
}

/// Raw results for one scoring event (a race day or round).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RoundResults {
    /// Declared number of races; inferred from the longest row when absent
    #[serde(default)]
    pub race_count: Option<usize>,

    /// Sail number -> entries in race order. `None` is a blank cell.
    #[serde(default)]
    pub rows: BTreeMap<String, Vec<Option<RawEntry>>>,
}

impl RoundResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for adding a row.
    pub fn with_row<I, E>(mut self, sail: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<RawEntry>,
    {
        self.rows.insert(
            sail.to_string(),
            entries.into_iter().map(|e| Some(e.into())).collect(),
        );
        self
    }
}

/// One competitor's result for a scoring event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundScore {
    pub competitor: Competitor,
    /// Entries as recorded, with absences filled in as DNS or DNC
    pub placements: Vec<RaceEntry>,
    pub race_scores: Vec<u32>,
    pub gross: u32,
    /// true = race dropped from the net total
    pub discards: Vec<bool>,
    pub net: u32,
    /// Finished at least one race in this event
    pub started: bool,
    pub rank: Option<Rank>,
}

impl RoundScore {
    pub fn discarded(&self) -> u32 {
        self.gross - self.net
    }
}

impl Scored for RoundScore {
    fn net(&self) -> u32 {
        self.net
    }

    fn scores(&self) -> &[u32] {
        &self.race_scores
    }
}

impl Ranked for RoundScore {
    fn set_rank(&mut self, rank: Rank) {
        self.rank = Some(rank);
    }
}

/// Everything produced by scoring one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundOutcome {
    pub scores: Vec<RoundScore>,
    pub race_count: usize,
    /// Competitors (on the roster or not) who finished at least one race
    pub attendance: u32,
    /// Points a non-attending competitor earns per race
    pub dnc_points: u32,
    /// Rows left out of the ranking, with the reason
    pub skipped: Vec<Skipped>,
}

impl RoundOutcome {
    /// Sort by the tie-break cascade and fill in ranks.
    pub fn into_ranked(mut self) -> Self {
        self.scores = rank_standings(self.scores);
        self
    }
}

struct FleetRow {
    entries: Vec<Option<RaceEntry>>,
    started: bool,
}

/// Score one event for every competitor on the roster. Scores come back in
/// roster order, unranked.
///
/// Rows whose sail number is not on the roster still count toward attendance
/// and race averages (the boat did sail) but get no score of their own.
pub fn score_round(
    ctx: &ScoringContext<'_>,
    results: &RoundResults,
) -> Result<RoundOutcome, ScoringError> {
    if ctx.roster.is_empty() {
        return Err(ScoringError::EmptyRoster);
    }

    let mut fleet: Vec<FleetRow> = Vec::with_capacity(results.rows.len());
    for (sail, cells) in &results.rows {
        let entries = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Some(raw) => raw.parse(sail, i + 1),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let started = entries
            .iter()
            .any(|e| matches!(e, Some(RaceEntry::Finish(_))));
        fleet.push(FleetRow { entries, started });
    }

    let mut skipped = Vec::new();
    let mut excluded = vec![false; fleet.len()];
    if let Some(declared) = results.race_count {
        for (i, (sail, row)) in results.rows.keys().zip(&fleet).enumerate() {
            if row.entries.len() > declared {
                excluded[i] = true;
                skipped.push(Skipped {
                    sail: sail.clone(),
                    reason: SkipReason::TooManyEntries {
                        entries: row.entries.len(),
                        race_count: declared,
                    },
                });
            }
        }
    }

    let race_count = results.race_count.unwrap_or_else(|| {
        fleet
            .iter()
            .map(|row| row.entries.len())
            .max()
            .unwrap_or(0)
    });

    // Match rows to roster entries by competitor id
    let mut by_competitor: HashMap<&str, usize> = HashMap::new();
    let mut dropped_competitors: Vec<&str> = Vec::new();
    for (i, sail) in results.rows.keys().enumerate() {
        let Some(competitor) = ctx.roster.find_by_sail(sail) else {
            skipped.push(Skipped {
                sail: sail.clone(),
                reason: SkipReason::NotInRoster,
            });
            continue;
        };
        if excluded[i] {
            dropped_competitors.push(competitor.id.as_str());
        } else if by_competitor.contains_key(competitor.id.as_str()) {
            // A skipped duplicate must not move attendance or redress averages
            excluded[i] = true;
            skipped.push(Skipped {
                sail: sail.clone(),
                reason: SkipReason::DuplicateResult,
            });
        } else {
            by_competitor.insert(competitor.id.as_str(), i);
        }
    }

    let live = || {
        fleet
            .iter()
            .zip(&excluded)
            .filter(|(_, excluded)| !**excluded)
            .map(|(row, _)| row)
    };

    let attendance = live().filter(|row| row.started).count() as u32;
    let averages: Vec<Option<u32>> = (0..race_count)
        .map(|r| race_average(live().filter_map(|row| row.entries.get(r).copied().flatten())))
        .collect();

    let resolver = Resolver::new(ctx.penalties, attendance, ctx.roster.len() as u32);

    let scores = ctx
        .roster
        .competitors()
        .iter()
        .filter(|c| !dropped_competitors.contains(&c.id.as_str()))
        .map(|competitor| {
            let row = by_competitor.get(competitor.id.as_str()).map(|&i| &fleet[i]);
            let started = row.is_some_and(|r| r.started);

            let placements: Vec<RaceEntry> = (0..race_count)
                .map(|r| {
                    row.and_then(|row| row.entries.get(r).copied().flatten())
                        .unwrap_or_else(|| absent_entry(started))
                })
                .collect();
            let race_scores: Vec<u32> = placements
                .iter()
                .zip(&averages)
                .map(|(entry, average)| resolver.resolve(*entry, *average))
                .collect();

            let gross = race_scores
                .iter()
                .try_fold(0u32, |acc, s| acc.checked_add(*s))
                .ok_or_else(|| ScoringError::ScoreOverflow {
                    sail: competitor.sail_number.clone(),
                })?;
            let discards = select_discards(&race_scores);
            let net = gross - discarded_sum(&race_scores, &discards);

            Ok(RoundScore {
                competitor: competitor.clone(),
                placements,
                race_scores,
                gross,
                discards,
                net,
                started,
                rank: None,
            })
        })
        .collect::<Result<Vec<_>, ScoringError>>()?;

    Ok(RoundOutcome {
        scores,
        race_count,
        attendance,
        dnc_points: resolver.dnc_points(),
        skipped,
    })
}
