use super::config::ScoringConfig;
use super::entry::StatusCode;
use super::penalty::PenaltyRule;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref penalties) = config.penalties {
        for (code, rule) in penalties {
            if *code == StatusCode::Ro {
                errors.push(
                    "scoring.penalties.RO: redress is always scored as the race average"
                        .to_string(),
                );
                continue;
            }
            if let Err(e) = PenaltyRule::parse(rule) {
                errors.push(format!(
                    "scoring.penalties.{}: invalid '{}' - {}",
                    code, rule, e
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config_with(entries: &[(StatusCode, &str)]) -> ScoringConfig {
        let penalties: BTreeMap<StatusCode, String> = entries
            .iter()
            .map(|(code, rule)| (*code, rule.to_string()))
            .collect();
        ScoringConfig {
            penalties: Some(penalties),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = config_with(&[(StatusCode::Ocs, "attendance+2"), (StatusCode::Dsq, "15")]);
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_rule() {
        let config = config_with(&[(StatusCode::Ret, "worst+1")]);
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.penalties.RET"));
    }

    #[test]
    fn test_oversized_offset_rejected() {
        let config = config_with(&[(StatusCode::Dnf, "attendance+4294967295")]);
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.penalties.DNF"));
    }

    #[test]
    fn test_ro_override_rejected() {
        let config = config_with(&[(StatusCode::Ro, "5")]);
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.penalties.RO"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = config_with(&[
            (StatusCode::Ro, "5"),
            (StatusCode::Bfd, "0"),
            (StatusCode::Dnf, "fleet-1"),
        ]);
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
