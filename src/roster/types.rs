use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::scoring::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub sail_number: String, // may carry a nation/club prefix, e.g. "GBR 1234"
    pub name: String,
}

impl Competitor {
    pub fn new(id: impl Into<String>, sail_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sail_number: sail_number.into(),
            name: name.into(),
        }
    }
}

/// The eligible competitors for one fleet, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    competitors: Vec<Competitor>,
}

impl Roster {
    /// Build a roster, rejecting duplicate sail numbers.
    pub fn new(competitors: Vec<Competitor>) -> Result<Self, ScoringError> {
        let mut seen = HashSet::new();
        for c in &competitors {
            if !seen.insert(normalize_sail(&c.sail_number)) {
                return Err(ScoringError::DuplicateSail(c.sail_number.clone()));
            }
        }
        Ok(Self { competitors })
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    /// Find the competitor a results sail number refers to.
    ///
    /// Exact match (ignoring case and surrounding whitespace) wins. Otherwise
    /// the trailing digits are compared, so "GBR 1234" finds roster entry
    /// "1234", but only when exactly one competitor matches that way.
    pub fn find_by_sail(&self, sail: &str) -> Option<&Competitor> {
        let wanted = normalize_sail(sail);
        if let Some(c) = self
            .competitors
            .iter()
            .find(|c| normalize_sail(&c.sail_number) == wanted)
        {
            return Some(c);
        }

        let digits = trailing_digits(&wanted)?;
        let mut matches = self
            .competitors
            .iter()
            .filter(|c| trailing_digits(&normalize_sail(&c.sail_number)) == Some(digits));
        match (matches.next(), matches.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

fn normalize_sail(sail: &str) -> String {
    sail.trim().to_ascii_uppercase()
}

/// The trailing run of digits with leading zeros removed.
fn trailing_digits(sail: &str) -> Option<&str> {
    let start = sail
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    let digits = sail[start..].trim_start_matches('0');
    Some(if digits.is_empty() { "0" } else { digits })
}
