use super::types::RoundHistory;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default history file path (~/.config/regatta-score/history.json)
pub fn get_history_path() -> PathBuf {
    crate::config::get_config_dir().join("history.json")
}

/// Load round history from a JSON file
///
/// If the file doesn't exist, returns a new empty history.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_history(path: &Path) -> Result<RoundHistory> {
    if !path.exists() {
        return Ok(RoundHistory::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open history file at {}", path.display()))?;

    let history: RoundHistory =
        serde_json::from_reader(file).context("Failed to load round history")?;

    if history.version != 1 {
        anyhow::bail!("Unsupported round history version: {}", history.version);
    }

    Ok(history)
}

/// Save round history to a JSON file atomically
///
/// The file is either fully replaced or left untouched, so a failed run never
/// leaves a half-written history behind. Creates the parent directory if needed.
pub fn save_history(path: &Path, history: &RoundHistory) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, history).context("Failed to serialize round history")?;

    file.commit().context("Failed to save round history")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::RoundInfo;
    use crate::roster::{Competitor, Roster};
    use crate::scoring::{score_round, PenaltyTable, RoundResults, ScoringContext};
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("regatta_score_test_missing_history.json");
        let _ = fs::remove_file(&temp_path);

        let history = load_history(&temp_path).unwrap();
        assert_eq!(history.version, 1);
        assert!(history.rounds.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("regatta_score_test_history_roundtrip.json");
        let _ = fs::remove_file(&temp_path);

        let roster = Roster::new(vec![
            Competitor::new("m1", "GBR 1", "Ann"),
            Competitor::new("m2", "GBR 2", "Bo"),
        ])
        .unwrap();
        let penalties = PenaltyTable::default();
        let ctx = ScoringContext::new(&roster, &penalties);
        let results = RoundResults::new()
            .with_row("GBR 1", [1u32, 2])
            .with_row("GBR 2", vec!["2", "DNF"]);
        let outcome = score_round(&ctx, &results).unwrap();

        let mut history = RoundHistory::new();
        history.record_round(
            RoundInfo {
                event_id: "spring-1".to_string(),
                ..RoundInfo::default()
            },
            &outcome,
        );

        save_history(&temp_path, &history).unwrap();
        let loaded = load_history(&temp_path).unwrap();

        assert_eq!(loaded, history);
        assert_eq!(loaded.next_round, 2);
        assert_eq!(loaded.rounds[0].results.nets.len(), 2);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let temp_path = env::temp_dir().join("regatta_score_test_history_version.json");
        fs::write(&temp_path, r#"{"version": 9, "next_round": 1, "rounds": []}"#).unwrap();

        let err = load_history(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported round history version"));

        let _ = fs::remove_file(&temp_path);
    }
}
