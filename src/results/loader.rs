use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::history::RoundInfo;
use crate::scoring::{RawEntry, RoundResults};

/// A round's results as entered by the race officer.
///
/// ```yaml
/// regatta: Winter Series
/// class: ILCA 7
/// date: 2026-01-04
/// races: 3
/// results:
///   "GBR 1234": [1, 2, DNF]
///   "567": [2, RO, 1]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResultsFile {
    #[serde(default)]
    pub regatta: Option<String>,

    #[serde(default)]
    pub class: Option<String>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Stable id for the event; re-recording the same id is a correction.
    /// Defaults to "<regatta>-<date>".
    #[serde(default)]
    pub event_id: Option<String>,

    /// Declared number of races
    #[serde(default)]
    pub races: Option<usize>,

    pub results: BTreeMap<String, Vec<Option<RawEntry>>>,
}

impl ResultsFile {
    pub fn round_results(&self) -> RoundResults {
        RoundResults {
            race_count: self.races,
            rows: self.results.clone(),
        }
    }

    pub fn round_info(&self) -> Result<RoundInfo> {
        let event_id = match (&self.event_id, &self.regatta, self.date) {
            (Some(id), _, _) => id.trim().to_string(),
            (None, Some(regatta), Some(date)) => {
                format!("{}-{}", slug(regatta), date.format("%Y-%m-%d"))
            }
            _ => bail!("Results need an event_id, or both regatta and date"),
        };
        if event_id.is_empty() {
            bail!("event_id must not be empty");
        }

        Ok(RoundInfo {
            event_id,
            regatta: self.regatta.clone(),
            class: self.class.clone(),
            date: self.date,
        })
    }
}

fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Load a round's results from a YAML file.
pub fn load_results(path: &Path) -> Result<ResultsFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file at {}", path.display()))?;

    let results: ResultsFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse results: invalid YAML in {}", path.display()))?;

    Ok(results)
}
