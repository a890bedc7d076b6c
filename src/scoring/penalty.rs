use anyhow::{bail, Result};
use std::collections::BTreeMap;

use super::config::ScoringConfig;
use super::entry::StatusCode;

/// Largest offset or fixed value a penalty rule may carry.
pub const MAX_PENALTY: u32 = 10_000;

/// How a status code turns into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyRule {
    /// Competitors who started the event, plus N
    AttendancePlus(u32),
    /// Competitors on the roster, plus N
    FleetPlus(u32),
    /// Fixed number of points
    Fixed(u32),
}

impl PenaltyRule {
    /// Parse "attendance+N", "fleet+N" or a bare "N".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("attendance") {
            Ok(PenaltyRule::AttendancePlus(parse_offset(rest, s)?))
        } else if let Some(rest) = s.strip_prefix("fleet") {
            Ok(PenaltyRule::FleetPlus(parse_offset(rest, s)?))
        } else {
            let points: u32 = s.parse()?;
            if points == 0 || points > MAX_PENALTY {
                bail!("Fixed penalty must be between 1 and {}: {}", MAX_PENALTY, s)
            }
            Ok(PenaltyRule::Fixed(points))
        }
    }

    pub fn points(&self, attendance: u32, fleet_size: u32) -> u32 {
        match self {
            PenaltyRule::AttendancePlus(n) => attendance.saturating_add(*n),
            PenaltyRule::FleetPlus(n) => fleet_size.saturating_add(*n),
            PenaltyRule::Fixed(n) => *n,
        }
    }
}

fn parse_offset(rest: &str, whole: &str) -> Result<u32> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(0);
    }
    let offset: u32 = match rest.strip_prefix('+') {
        Some(val) => val.trim().parse()?,
        None => bail!("Penalty offset must be written as +N: {}", whole),
    };
    if offset > MAX_PENALTY {
        bail!("Penalty offset must be at most {}: {}", MAX_PENALTY, whole);
    }
    Ok(offset)
}

/// Resolved penalty rules for every code except RO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyTable {
    rules: BTreeMap<StatusCode, PenaltyRule>,
}

impl Default for PenaltyTable {
    fn default() -> Self {
        let rules = StatusCode::ALL
            .iter()
            .filter(|code| **code != StatusCode::Ro)
            .map(|code| (*code, PenaltyRule::AttendancePlus(1)))
            .collect();
        Self { rules }
    }
}

impl PenaltyTable {
    /// Build from config, layering overrides onto the defaults.
    /// Run `validate_scoring` first; this rejects the first bad rule it meets.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let mut table = Self::default();
        if let Some(ref penalties) = config.penalties {
            for (code, rule) in penalties {
                if *code == StatusCode::Ro {
                    bail!("RO is scored as the race average and cannot be overridden");
                }
                table.rules.insert(*code, PenaltyRule::parse(rule)?);
            }
        }
        Ok(table)
    }

    /// Penalty rule for a code. RO has no rule of its own and falls back to DNC.
    pub fn rule(&self, code: StatusCode) -> PenaltyRule {
        self.rules
            .get(&code)
            .or_else(|| self.rules.get(&StatusCode::Dnc))
            .copied()
            .unwrap_or(PenaltyRule::AttendancePlus(1))
    }

    pub fn points(&self, code: StatusCode, attendance: u32, fleet_size: u32) -> u32 {
        self.rule(code).points(attendance, fleet_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attendance_rule() {
        assert_eq!(
            PenaltyRule::parse("attendance+1").unwrap(),
            PenaltyRule::AttendancePlus(1)
        );
        assert_eq!(
            PenaltyRule::parse(" attendance + 3 ").unwrap(),
            PenaltyRule::AttendancePlus(3)
        );
        assert_eq!(
            PenaltyRule::parse("attendance").unwrap(),
            PenaltyRule::AttendancePlus(0)
        );
    }

    #[test]
    fn test_parse_fleet_rule() {
        assert_eq!(PenaltyRule::parse("fleet+2").unwrap(), PenaltyRule::FleetPlus(2));
    }

    #[test]
    fn test_parse_fixed_rule() {
        assert_eq!(PenaltyRule::parse("12").unwrap(), PenaltyRule::Fixed(12));
        assert!(PenaltyRule::parse("0").is_err());
    }

    #[test]
    fn test_parse_invalid_rules() {
        assert!(PenaltyRule::parse("attendance-1").is_err());
        assert!(PenaltyRule::parse("fleet+x").is_err());
        assert!(PenaltyRule::parse("worst").is_err());
    }

    #[test]
    fn test_parse_rejects_oversized_values() {
        assert_eq!(
            PenaltyRule::parse("attendance+10000").unwrap(),
            PenaltyRule::AttendancePlus(MAX_PENALTY)
        );
        assert!(PenaltyRule::parse("attendance+4294967295").is_err());
        assert!(PenaltyRule::parse("fleet+10001").is_err());
        assert!(PenaltyRule::parse("10001").is_err());
    }

    #[test]
    fn test_rule_points_saturate() {
        assert_eq!(PenaltyRule::AttendancePlus(u32::MAX).points(5, 0), u32::MAX);
    }

    #[test]
    fn test_rule_points() {
        assert_eq!(PenaltyRule::AttendancePlus(1).points(7, 12), 8);
        assert_eq!(PenaltyRule::FleetPlus(1).points(7, 12), 13);
        assert_eq!(PenaltyRule::Fixed(20).points(7, 12), 20);
    }

    #[test]
    fn test_default_table_all_attendance_plus_one() {
        let table = PenaltyTable::default();
        for code in StatusCode::ALL {
            assert_eq!(table.points(code, 5, 9), 6, "{}", code);
        }
    }

    #[test]
    fn test_table_from_config_overrides() {
        let mut penalties = BTreeMap::new();
        penalties.insert(StatusCode::Dsq, "fleet+1".to_string());
        let config = ScoringConfig {
            penalties: Some(penalties),
        };
        let table = PenaltyTable::from_config(&config).unwrap();
        assert_eq!(table.points(StatusCode::Dsq, 5, 9), 10);
        assert_eq!(table.points(StatusCode::Dnf, 5, 9), 6);
    }

    #[test]
    fn test_table_rejects_ro_override() {
        let mut penalties = BTreeMap::new();
        penalties.insert(StatusCode::Ro, "5".to_string());
        let config = ScoringConfig {
            penalties: Some(penalties),
        };
        assert!(PenaltyTable::from_config(&config).is_err());
    }
}
