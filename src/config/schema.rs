use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default roster file, used when --roster is not given
    #[serde(default)]
    pub roster: Option<PathBuf>,

    /// Round history file (defaults to ~/.config/regatta-score/history.json)
    #[serde(default)]
    pub history: Option<PathBuf>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::StatusCode;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
roster: /srv/club/roster.yaml
history: /srv/club/history.json
scoring:
  penalties:
    DSQ: "fleet+1"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.roster, Some(PathBuf::from("/srv/club/roster.yaml")));
        let penalties = config.scoring.unwrap().penalties.unwrap();
        assert_eq!(penalties[&StatusCode::Dsq], "fleet+1");
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }
}
