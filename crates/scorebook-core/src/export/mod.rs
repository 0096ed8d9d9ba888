//! Export formats for live snapshots, match records and NRR reports.

mod console;

pub use console::*;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Value as JsonValue, json};

use crate::error::Result;
use crate::nrr::NrrReport;
use crate::session::MatchRecord;
use crate::state::MatchState;

/// Pretty JSON for any exportable value
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write pretty JSON to `path`, creating parent directories
pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json_pretty(value)?)?;
    Ok(())
}

/// Compact summary of a live state for a host display or feed
pub fn format_live_json(state: &MatchState) -> JsonValue {
    let bpo = state.settings.balls_per_over;
    json!({
        "phase": state.phase.to_string(),
        "innings": state.innings_number(),
        "batting_team": state.innings.batting_team,
        "runs": state.innings.runs,
        "wickets": state.innings.wickets,
        "overs": state.innings.overs(bpo).to_string(),
        "target": (state.target > 0).then_some(state.target),
        "striker": state.striker().map(|b| b.name.as_str()),
        "non_striker": state.non_striker().map(|b| b.name.as_str()),
        "bowler": state.bowler().map(|b| b.name.as_str()),
        "this_over": state.over.tokens,
        "result": state.result.as_ref().map(|r| r.to_string()),
    })
}

/// Record summary with both innings totals and NRR
pub fn format_record_json(record: &MatchRecord) -> JsonValue {
    let bpo = record.settings.balls_per_over;
    let innings = |i: &crate::state::Innings| {
        json!({
            "team": i.batting_team,
            "runs": i.runs,
            "wickets": i.wickets,
            "overs": i.overs(bpo).to_string(),
        })
    };
    json!({
        "result": record.result,
        "innings1": innings(&record.innings1),
        "innings2": innings(&record.innings2),
        "total_overs": record.total_overs,
        "completed_at": record.completion_timestamp.to_rfc3339(),
        "nrr": record.nrr().map(|r| nrr_json(&r, record.team_a(), record.team_b())),
    })
}

/// NRR report keyed by team name
pub fn nrr_json(report: &NrrReport, team_a: &str, team_b: &str) -> JsonValue {
    json!({
        team_a: report.team_a,
        team_b: report.team_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchSettings;
    use crate::nrr::{InningsSummary, NrrSettings, calculate_nrr};
    use crate::state::{Overs, Team};
    use tempfile::TempDir;

    fn state() -> MatchState {
        MatchState::new(
            MatchSettings::default(),
            &Team::new("Falcons", vec!["Asha".into(), "Ben".into()]),
            &Team::new("Herons", vec!["Kit".into()]),
        )
        .unwrap()
    }

    #[test]
    fn test_live_json() {
        let value = format_live_json(&state());
        assert_eq!(value["batting_team"], "Falcons");
        assert_eq!(value["innings"], 1);
        assert_eq!(value["overs"], "0.0");
        assert_eq!(value["striker"], "Asha");
        assert_eq!(value["bowler"], "Kit");
        assert!(value["target"].is_null());
        assert!(value["result"].is_null());
    }

    #[test]
    fn test_nrr_json_keyed_by_team() {
        let first = InningsSummary::new(150, 5, Overs::parse("20.0", 6).unwrap());
        let second = InningsSummary::new(151, 3, Overs::parse("18.2", 6).unwrap());
        let report = calculate_nrr(&first, &second, &NrrSettings::default()).unwrap();

        let value = nrr_json(&report, "Falcons", "Herons");
        assert_eq!(value["Falcons"]["nrr"], -0.736);
        assert_eq!(value["Herons"]["nrr"], 0.736);
    }

    #[test]
    fn test_write_json_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("state.json");
        let state = state();
        write_json(&path, &state).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let back: MatchState = serde_json::from_str(&content).unwrap();
        assert_eq!(back, state);
    }
}
