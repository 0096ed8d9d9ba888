//! Show command: render a saved snapshot or match record.

use anyhow::{Context, Result, bail};
use scorebook_core::export::{
    format_innings_console, format_live_json, format_live_status, format_nrr_report,
    format_record_json, format_result,
};
use scorebook_core::session::MatchRecord;
use scorebook_core::state::MatchState;

enum Saved {
    Record(Box<MatchRecord>),
    Live(Box<MatchState>),
}

pub fn run(file: &str, json: bool) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read: {}", file))?;

    match (load(&content)?, json) {
        (Saved::Record(record), true) => {
            println!("{}", serde_json::to_string_pretty(&format_record_json(&record))?);
        }
        (Saved::Record(record), false) => print_record(&record),
        (Saved::Live(state), true) => {
            println!("{}", serde_json::to_string_pretty(&format_live_json(&state))?);
        }
        (Saved::Live(state), false) => {
            if let Some(first) = &state.first_innings {
                println!("{}", format_innings_console(first, &state.settings));
                println!();
            }
            println!("{}", format_innings_console(&state.innings, &state.settings));
            println!();
            println!("{}", format_live_status(&state));
        }
    }
    Ok(())
}

fn load(content: &str) -> Result<Saved> {
    if let Ok(record) = serde_json::from_str::<MatchRecord>(content) {
        return Ok(Saved::Record(Box::new(record)));
    }
    match serde_json::from_str::<MatchState>(content) {
        Ok(state) => Ok(Saved::Live(Box::new(state))),
        Err(e) => bail!("Not a match snapshot or record: {}", e),
    }
}

fn print_record(record: &MatchRecord) {
    println!("{}", format_innings_console(&record.innings1, &record.settings));
    println!();
    println!("{}", format_innings_console(&record.innings2, &record.settings));
    println!();
    println!("{}", format_result(&record.outcome));
    println!(
        "Completed: {}",
        record.completion_timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(report) = record.nrr() {
        println!();
        println!("{}", format_nrr_report(&report, record.team_a(), record.team_b()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebook_core::scoring::BallEvent;
    use scorebook_core::state::Team;
    use scorebook_core::{MatchSettings, ScoringSession};

    fn session() -> ScoringSession {
        let settings = MatchSettings {
            overs: 1,
            players_per_team: 3,
            ..Default::default()
        };
        ScoringSession::new(
            settings,
            &Team::new("Falcons", Vec::new()),
            &Team::new("Herons", Vec::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_load_live_snapshot() {
        let mut session = session();
        session.score(&BallEvent::Runs(2)).unwrap();
        let json = session.to_json().unwrap();
        assert!(matches!(load(&json).unwrap(), Saved::Live(_)));
    }

    #[test]
    fn test_load_record() {
        let mut session = session();
        for _ in 0..6 {
            session.score(&BallEvent::Runs(1)).unwrap();
        }
        session.start_second_innings().unwrap();
        for _ in 0..2 {
            session.score(&BallEvent::Runs(4)).unwrap();
        }
        let record = session.final_record().unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(matches!(load(&json).unwrap(), Saved::Record(_)));
    }

    #[test]
    fn test_load_garbage() {
        assert!(load("{\"hello\": 1}").is_err());
    }
}
