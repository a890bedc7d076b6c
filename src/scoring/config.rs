use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::entry::StatusCode;

/// Scoring configuration.
///
/// Every status code except RO scores `attendance+1` unless overridden here.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   penalties:
///     OCS: "attendance+2"
///     DSQ: "fleet+1"
///     RET: "10"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Penalty rule per status code: "attendance+N", "fleet+N" or a fixed "N"
    #[serde(default)]
    pub penalties: Option<BTreeMap<StatusCode, String>>,
}
