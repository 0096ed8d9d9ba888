//! Score command: replay a scoring script against a new or resumed match.

use anyhow::{Context, Result, bail};
use scorebook_core::export::{
    format_innings_console, format_live_status, format_record_json, format_result, to_json_pretty,
};
use scorebook_core::session::{JsonFileStore, MatchStore, new_match_id};
use scorebook_core::state::{InningsPhase, MatchState};
use scorebook_core::{MatchConfig, ScoringSession};
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::script::parse_script;

pub struct ScoreOptions<'a> {
    pub store_dir: &'a str,
    pub config: Option<&'a str>,
    pub resume: Option<&'a str>,
    pub script: &'a str,
    pub format: OutputFormat,
    pub save: bool,
    pub match_id: Option<&'a str>,
}

pub fn run(options: ScoreOptions<'_>) -> Result<()> {
    let mut session = open_session(options.config, options.resume)?;

    let content = std::fs::read_to_string(options.script)
        .with_context(|| format!("Failed to read script: {}", options.script))?;
    let commands = parse_script(&content)?;
    info!("Replaying {} script entries", commands.len());

    for (line, command) in &commands {
        let done = command
            .execute(&mut session)
            .with_context(|| format!("line {}: {:?}", line, command))?;
        info!("line {}: {}", line, done);
    }

    let state = session.state();
    match options.format {
        OutputFormat::Console => print_console(state),
        OutputFormat::Json => match session.final_record() {
            Ok(record) => println!("{}", serde_json::to_string_pretty(&format_record_json(&record))?),
            Err(_) => println!("{}", session.to_json()?),
        },
    }

    if options.save {
        let match_id = options
            .match_id
            .map(str::to_string)
            .unwrap_or_else(new_match_id);
        save(&session, options.store_dir, &match_id);
    }

    Ok(())
}

fn open_session(config: Option<&str>, resume: Option<&str>) -> Result<ScoringSession> {
    match (config, resume) {
        (Some(path), None) => {
            let config = MatchConfig::load(path)
                .with_context(|| format!("Failed to load match config: {}", path))?;
            Ok(ScoringSession::from_config(&config)?)
        }
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read snapshot: {}", path))?;
            let state: MatchState = serde_json::from_str(&content)
                .with_context(|| format!("Invalid snapshot: {}", path))?;
            ScoringSession::resume(state).with_context(|| format!("Invalid snapshot: {}", path))
        }
        _ => bail!("Provide either --config or --resume"),
    }
}

fn print_console(state: &MatchState) {
    if let Some(first) = &state.first_innings {
        println!("{}", format_innings_console(first, &state.settings));
        println!();
    }
    println!("{}", format_innings_console(&state.innings, &state.settings));
    println!();
    match (&state.result, state.phase) {
        (Some(result), _) => println!("{}", format_result(result)),
        (None, InningsPhase::FirstInningsEnded) => {
            println!("{}", format_live_status(state));
            println!(
                "{} need {} to win",
                state.team_b.name,
                state.innings.runs + 1
            );
        }
        _ => println!("{}", format_live_status(state)),
    }
}

/// Save failures are reported but never fail the command
fn save(session: &ScoringSession, store_dir: &str, match_id: &str) {
    let mut store = JsonFileStore::new(store_dir);
    let saved = match session.final_record() {
        Ok(record) => store
            .save_record(match_id, &record)
            .map(|_| store.record_path(match_id)),
        Err(_) => store
            .save_live(match_id, session.state())
            .map(|_| store.live_path(match_id)),
    };

    match saved {
        Ok(path) => eprintln!("Saved to: {}", path.display()),
        Err(e) => {
            warn!("Failed to save match {}: {}", match_id, e);
            eprintln!("Could not save match {}: {}", match_id, e);
            if let Ok(json) = to_json_pretty(session.state()) {
                eprintln!("Live state follows so it can be restored with --resume:");
                eprintln!("{}", json);
            }
        }
    }
}
