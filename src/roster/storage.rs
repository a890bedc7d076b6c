use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::types::{Competitor, Roster};

/// On-disk roster layout.
///
/// ```yaml
/// competitors:
///   - { id: m1, sail_number: "GBR 1234", name: Ann Lee }
/// ```
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RosterFile {
    pub competitors: Vec<Competitor>,
}

/// Load a roster from a YAML file.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file at {}", path.display()))?;

    let file: RosterFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse roster: invalid YAML in {}", path.display()))?;

    let roster = Roster::new(file.competitors)
        .with_context(|| format!("Invalid roster in {}", path.display()))?;

    Ok(roster)
}
