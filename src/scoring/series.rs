use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::day::RoundOutcome;
use super::discard::{discard_count, discarded_sum, select_discards};
use super::rank::{rank_standings, Rank, Ranked};
use super::tiebreak::Scored;
use crate::roster::Competitor;

/// One competitor's net score for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundNet {
    pub competitor: Competitor,
    pub net: u32,
    /// Finished at least one race in the round
    pub started: bool,
}

/// The part of a scored round the series needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRound {
    /// Competitors who finished at least one race in the round
    pub attendance: u32,
    pub race_count: usize,
    /// Points per race for a competitor who did not come
    pub dnc_points: u32,
    pub nets: Vec<RoundNet>,
}

impl SeriesRound {
    pub fn from_outcome(outcome: &RoundOutcome) -> Self {
        Self {
            attendance: outcome.attendance,
            race_count: outcome.race_count,
            dnc_points: outcome.dnc_points,
            nets: outcome
                .scores
                .iter()
                .map(|s| RoundNet {
                    competitor: s.competitor.clone(),
                    net: s.net,
                    started: s.started,
                })
                .collect(),
        }
    }

    /// Series score for a competitor with no net in this round: DNC in every
    /// race, less the round's discards. This is the net `score_round` gives a
    /// roster competitor who never sailed.
    pub fn dnc_net(&self) -> u32 {
        let counted = self.race_count - discard_count(self.race_count);
        let counted = u32::try_from(counted).unwrap_or(u32::MAX);
        self.dnc_points.saturating_mul(counted)
    }

    fn net_for(&self, key: &str) -> Option<&RoundNet> {
        self.nets.iter().find(|n| sail_key(&n.competitor.sail_number) == key)
    }
}

/// A competitor's cumulative result across the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStanding {
    pub competitor: Competitor,
    /// Net score per round in round order, absences already substituted
    pub round_nets: Vec<u32>,
    /// true = no score was posted for that round
    pub absent: Vec<bool>,
    pub gross: u32,
    pub discards: Vec<bool>,
    pub net: u32,
    /// Rounds in which the competitor finished at least one race
    pub rounds_attended: usize,
    pub rank: Option<Rank>,
}

impl SeriesStanding {
    pub fn discarded(&self) -> u32 {
        self.gross - self.net
    }
}

impl Scored for SeriesStanding {
    fn net(&self) -> u32 {
        self.net
    }

    fn scores(&self) -> &[u32] {
        &self.round_nets
    }
}

impl Ranked for SeriesStanding {
    fn set_rank(&mut self, rank: Rank) {
        self.rank = Some(rank);
    }
}

fn sail_key(sail: &str) -> String {
    sail.trim().to_ascii_uppercase()
}

/// Rebuild the series standings from the complete round history.
///
/// Every competitor seen in any round gets one score per round; a round
/// without a posted net scores that round's DNC net. Discards follow the
/// same schedule as races within a round. The result is sorted and ranked.
/// Nothing is cached, so re-running on a corrected history is always safe.
pub fn aggregate(rounds: &[SeriesRound]) -> Vec<SeriesStanding> {
    // Latest details per competitor, in order of first appearance
    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, Competitor> = HashMap::new();
    for round in rounds {
        for entry in &round.nets {
            let key = sail_key(&entry.competitor.sail_number);
            if !latest.contains_key(&key) {
                order.push(key.clone());
            }
            latest.insert(key, entry.competitor.clone());
        }
    }

    let standings = order
        .into_iter()
        .filter_map(|key| {
            let competitor = latest.remove(&key)?;
            let mut round_nets = Vec::with_capacity(rounds.len());
            let mut absent = Vec::with_capacity(rounds.len());
            let mut rounds_attended = 0;

            for round in rounds {
                match round.net_for(&key) {
                    Some(entry) => {
                        round_nets.push(entry.net);
                        absent.push(false);
                        if entry.started {
                            rounds_attended += 1;
                        }
                    }
                    None => {
                        round_nets.push(round.dnc_net());
                        absent.push(true);
                    }
                }
            }

            let gross = round_nets.iter().fold(0u32, |acc, n| acc.saturating_add(*n));
            let discards = select_discards(&round_nets);
            let net = gross.saturating_sub(discarded_sum(&round_nets, &discards));

            Some(SeriesStanding {
                competitor,
                round_nets,
                absent,
                gross,
                discards,
                net,
                rounds_attended,
                rank: None,
            })
        })
        .collect();

    rank_standings(standings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use crate::scoring::{score_round, PenaltyTable, RoundResults, ScoringContext};

    fn competitor(sail: &str) -> Competitor {
        Competitor::new(format!("id-{}", sail), sail, format!("Sailor {}", sail))
    }

    fn round(attendance: u32, nets: &[(&str, u32)]) -> SeriesRound {
        SeriesRound {
            attendance,
            race_count: 1,
            dnc_points: attendance + 1,
            nets: nets
                .iter()
                .map(|(sail, net)| RoundNet {
                    competitor: competitor(sail),
                    net: *net,
                    started: true,
                })
                .collect(),
        }
    }

    fn standing<'a>(standings: &'a [SeriesStanding], sail: &str) -> &'a SeriesStanding {
        standings
            .iter()
            .find(|s| s.competitor.sail_number == sail)
            .unwrap()
    }

    #[test]
    fn test_no_rounds() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_sums_and_discards_without_absences() {
        let rounds = vec![
            round(3, &[("A", 10), ("B", 12)]),
            round(3, &[("A", 15), ("B", 9)]),
            round(3, &[("A", 8), ("B", 11)]),
            round(3, &[("A", 20), ("B", 10)]),
        ];
        let standings = aggregate(&rounds);

        let a = standing(&standings, "A");
        assert_eq!(a.round_nets, vec![10, 15, 8, 20]);
        assert_eq!(a.gross, 53);
        assert_eq!(a.discarded(), 20);
        assert_eq!(a.net, 33);
        assert_eq!(a.discards.iter().filter(|d| **d).count(), discard_count(4));

        let b = standing(&standings, "B");
        assert_eq!(b.gross, 42);
        assert_eq!(b.net, 30);
        assert_eq!(standings[0].competitor.sail_number, "B");
    }

    #[test]
    fn test_absence_scores_round_dnc() {
        let rounds = vec![
            round(5, &[("A", 4), ("B", 6)]),
            round(3, &[("A", 5)]),
        ];
        let standings = aggregate(&rounds);
        let b = standing(&standings, "B");
        assert_eq!(b.round_nets, vec![6, 4]);
        assert_eq!(b.absent, vec![false, true]);
        assert_eq!(b.rounds_attended, 1);
        assert_eq!(b.net, 10);
    }

    fn scored_round(sails: &[&str], rows: &[(&str, u32)], races: usize) -> SeriesRound {
        let roster = Roster::new(sails.iter().map(|s| competitor(s)).collect()).unwrap();
        let penalties = PenaltyTable::default();
        let ctx = ScoringContext::new(&roster, &penalties);
        let results = rows.iter().fold(RoundResults::new(), |results, (sail, place)| {
            results.with_row(sail, vec![*place; races])
        });
        SeriesRound::from_outcome(&score_round(&ctx, &results).unwrap())
    }

    #[test]
    fn test_absence_scores_whole_round_of_dnc() {
        let first_fleet = ["A", "B", "C", "D", "E", "F", "G"];
        let first_rows: Vec<(&str, u32)> = first_fleet
            .iter()
            .enumerate()
            .map(|(i, s)| (*s, i as u32 + 1))
            .collect();
        let mut second_rows = first_rows.clone();
        second_rows.push(("H", 8));
        let second_fleet = ["A", "B", "C", "D", "E", "F", "G", "H"];

        let rounds = vec![
            scored_round(&first_fleet, &first_rows, 6),
            scored_round(&second_fleet, &second_rows, 6),
        ];
        // 6 races at 8 points, one discarded
        assert_eq!(rounds[0].dnc_net(), 40);

        let standings = aggregate(&rounds);
        let h = standing(&standings, "H");
        assert_eq!(h.round_nets, vec![40, 40]);
        assert_eq!(h.absent, vec![true, false]);
        assert_eq!(standings.last().unwrap().competitor.sail_number, "H");
        assert_eq!(standing(&standings, "G").net, 70);
    }

    #[test]
    fn test_absent_matches_roster_competitor_without_results() {
        let rows = [("A", 1), ("B", 2)];
        let with_c = scored_round(&["A", "B", "C"], &rows, 5);
        let without_c = scored_round(&["A", "B"], &rows, 5);
        let c = with_c
            .nets
            .iter()
            .find(|n| n.competitor.sail_number == "C")
            .unwrap();
        assert_eq!(without_c.dnc_net(), c.net);
    }

    #[test]
    fn test_dnc_net_follows_configured_penalty() {
        let mut r = round(4, &[("A", 3)]);
        r.race_count = 3;
        r.dnc_points = 10;
        assert_eq!(r.dnc_net(), 30);
        r.race_count = 0;
        assert_eq!(r.dnc_net(), 0);
    }

    #[test]
    fn test_competitor_joining_late() {
        let rounds = vec![round(2, &[("A", 3)]), round(2, &[("A", 3), ("C", 2)])];
        let standings = aggregate(&rounds);
        let c = standing(&standings, "C");
        assert_eq!(c.round_nets, vec![3, 2]);
        assert_eq!(c.absent, vec![true, false]);
    }

    #[test]
    fn test_not_started_round_not_attended() {
        let mut r = round(4, &[("A", 10)]);
        r.nets[0].started = false;
        let standings = aggregate(&[r, round(4, &[("A", 2)])]);
        assert_eq!(standing(&standings, "A").rounds_attended, 1);
    }

    #[test]
    fn test_sail_numbers_match_across_rounds_ignoring_case() {
        let rounds = vec![round(2, &[("gbr 7", 3)]), round(2, &[("GBR 7", 1)])];
        let standings = aggregate(&rounds);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].round_nets, vec![3, 1]);
        assert_eq!(standings[0].competitor.sail_number, "GBR 7");
    }

    #[test]
    fn test_series_tie_break_and_labels() {
        // A and B both net 9; A's best round is better
        let rounds = vec![
            round(3, &[("A", 2), ("B", 4), ("C", 1)]),
            round(3, &[("A", 7), ("B", 5), ("C", 1)]),
        ];
        let standings = aggregate(&rounds);
        let order: Vec<_> = standings
            .iter()
            .map(|s| s.competitor.sail_number.as_str())
            .collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        let labels: Vec<String> = standings
            .iter()
            .map(|s| s.rank.unwrap().to_string())
            .collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_series_full_tie_shares_rank() {
        let rounds = vec![round(3, &[("A", 2), ("B", 2), ("C", 1)])];
        let standings = aggregate(&rounds);
        let labels: Vec<String> = standings
            .iter()
            .map(|s| s.rank.unwrap().to_string())
            .collect();
        assert_eq!(labels, vec!["1", "2=", "2="]);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let rounds = vec![
            round(4, &[("A", 5), ("B", 3), ("C", 9)]),
            round(3, &[("A", 2), ("C", 4)]),
            round(4, &[("A", 6), ("B", 1), ("C", 2)]),
            round(4, &[("B", 7), ("C", 3)]),
        ];
        assert_eq!(aggregate(&rounds), aggregate(&rounds));
    }
}
