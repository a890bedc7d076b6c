use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ScoringError;

/// Non-finishing result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusCode {
    /// Did not start this race (but sailed elsewhere in the event)
    Dns,
    /// Did not finish
    Dnf,
    /// Did not compete in the event at all
    Dnc,
    /// Redress: scored as the race average
    Ro,
    /// On course side at the start
    Ocs,
    /// Black flag disqualification
    Bfd,
    /// Retired
    Ret,
    /// Disqualified
    Dsq,
}

impl StatusCode {
    pub const ALL: [StatusCode; 8] = [
        StatusCode::Dns,
        StatusCode::Dnf,
        StatusCode::Dnc,
        StatusCode::Ro,
        StatusCode::Ocs,
        StatusCode::Bfd,
        StatusCode::Ret,
        StatusCode::Dsq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Dns => "DNS",
            StatusCode::Dnf => "DNF",
            StatusCode::Dnc => "DNC",
            StatusCode::Ro => "RO",
            StatusCode::Ocs => "OCS",
            StatusCode::Bfd => "BFD",
            StatusCode::Ret => "RET",
            StatusCode::Dsq => "DSQ",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        StatusCode::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or_else(|| format!("unknown status code '{}'", s.trim()))
    }
}

/// One competitor's result in one race, as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RaceEntry {
    Finish(u32),
    Code(StatusCode),
}

impl RaceEntry {
    pub fn position(&self) -> Option<u32> {
        match self {
            RaceEntry::Finish(p) => Some(*p),
            RaceEntry::Code(_) => None,
        }
    }
}

impl fmt::Display for RaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceEntry::Finish(p) => write!(f, "{}", p),
            RaceEntry::Code(code) => write!(f, "{}", code),
        }
    }
}

/// A results cell before validation: a number or free text.
///
/// Results sources hand over whatever was typed in; conversion to a
/// [`RaceEntry`] happens in the scorer so bad cells fail the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Position(i64),
    Text(String),
}

impl RawEntry {
    /// Validate a cell. Blank text means "no entry for this race".
    pub fn parse(&self, sail: &str, race: usize) -> Result<Option<RaceEntry>, ScoringError> {
        match self {
            RawEntry::Position(value) => positive(*value, sail, race).map(Some),
            RawEntry::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                if let Ok(value) = text.parse::<i64>() {
                    return positive(value, sail, race).map(Some);
                }
                text.parse::<StatusCode>()
                    .map(|code| Some(RaceEntry::Code(code)))
                    .map_err(|_| ScoringError::InvalidCode {
                        sail: sail.to_string(),
                        race,
                        code: text.to_string(),
                    })
            }
        }
    }
}

/// Largest finishing position accepted from a results sheet.
pub const MAX_POSITION: u32 = 9_999;

fn positive(value: i64, sail: &str, race: usize) -> Result<RaceEntry, ScoringError> {
    match u32::try_from(value) {
        Ok(p) if (1..=MAX_POSITION).contains(&p) => Ok(RaceEntry::Finish(p)),
        _ => Err(ScoringError::InvalidPosition {
            sail: sail.to_string(),
            race,
            value,
        }),
    }
}

impl From<u32> for RawEntry {
    fn from(value: u32) -> Self {
        RawEntry::Position(value as i64)
    }
}

impl From<&str> for RawEntry {
    fn from(value: &str) -> Self {
        RawEntry::Text(value.to_string())
    }
}
