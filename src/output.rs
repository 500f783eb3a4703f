//! Report serialization to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::matchup::MatchupReport;

/// File name for a matchup document: a pure function of the two team
/// names, so reruns of the same matchup land on the same path.
pub fn report_filename(away_team: &str, home_team: &str) -> String {
    format!("matchup_data_{away_team}_{home_team}.json")
}

/// Write `report` under `dir` (created if missing), silently overwriting
/// any previous document for the same matchup. Returns the full path.
pub fn write_report(report: &MatchupReport, dir: &Path) -> Result<PathBuf> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(report_filename(
        &report.game.away_team,
        &report.game.home_team,
    ));

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchup::{LinesSection, RatingsSection, TeamSection};
    use serde_json::{json, Value};

    fn sample_report() -> MatchupReport {
        let game = serde_json::from_value(json!({
            "id": 42u64,
            "season": 2024,
            "week": 10,
            "home_team": "Michigan",
            "away_team": "Ohio State"
        }))
        .unwrap();

        let section = |team: &str| TeamSection {
            team: team.to_string(),
            season_stats: None,
            ratings: RatingsSection::default(),
            record: None,
            returning_production: None,
            talent: None,
        };

        MatchupReport {
            game,
            weather: Some(json!({"temperature": 3.9})),
            win_probability: None,
            lines: LinesSection {
                current: None,
                home_history: Vec::new(),
                away_history: Vec::new(),
            },
            matchup_history: None,
            home: section("Michigan"),
            away: section("Ohio State"),
        }
    }

    #[test]
    fn filename_is_a_pure_function_of_the_team_names() {
        assert_eq!(
            report_filename("Ohio State", "Michigan"),
            "matchup_data_Ohio State_Michigan.json"
        );
        // Spaces are preserved, order matters.
        assert_eq!(
            report_filename("Michigan", "Ohio State"),
            "matchup_data_Michigan_Ohio State.json"
        );
    }

    #[test]
    fn rerun_overwrites_the_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();

        let first = write_report(&report, dir.path()).unwrap();
        let second = write_report(&report, dir.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn written_document_keeps_the_section_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(&sample_report(), dir.path()).unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(doc["game"]["home_team"], "Michigan");
        assert_eq!(doc["weather"]["temperature"], json!(3.9));
        assert!(doc["win_probability"].is_null());
        assert!(doc["lines"]["home_history"].as_array().unwrap().is_empty());
        assert_eq!(doc["away"]["team"], "Ohio State");
    }

    #[test]
    fn unwritable_target_surfaces_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocking_file = dir.path().join("taken");
        fs::write(&blocking_file, b"").unwrap();

        // The target directory path is an existing file.
        let result = write_report(&sample_report(), &blocking_file);
        assert!(matches!(result, Err(crate::CfbdError::Io(_))));
    }
}
