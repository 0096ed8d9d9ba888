//! NRR command: net run rate from two innings given on the command line.

use anyhow::{Context, Result, bail};
use scorebook_core::export::{format_nrr_report, nrr_json};
use scorebook_core::nrr::{InningsSummary, NrrSettings, calculate_nrr};
use scorebook_core::state::Overs;

/// Score and overs as typed, e.g. ("150/5", "20.0")
pub type InningsArg<'a> = (&'a str, &'a str);

pub fn run(
    first: InningsArg<'_>,
    second: InningsArg<'_>,
    overs: u32,
    balls_per_over: u32,
    players: u32,
    json: bool,
) -> Result<()> {
    if overs == 0 || balls_per_over == 0 || players < 2 {
        bail!("Overs and balls per over must be positive, with at least 2 players a side");
    }
    let settings = NrrSettings {
        total_overs: overs,
        balls_per_over,
        players_per_team: players,
    };

    let first = parse_innings(first, &settings).context("First innings")?;
    let second = parse_innings(second, &settings).context("Second innings")?;

    let Some(report) = calculate_nrr(&first, &second, &settings) else {
        bail!("No result: a side has no overs faced");
    };

    if json {
        let value = nrr_json(&report, "team_a", "team_b");
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", format_nrr_report(&report, "Team A", "Team B"));
    }
    Ok(())
}

fn parse_innings((score, overs): InningsArg<'_>, settings: &NrrSettings) -> Result<InningsSummary> {
    let (runs, wickets) = parse_score(score)?;
    let max_wickets = settings.players_per_team - 1;
    if wickets > max_wickets {
        bail!("{} wickets is more than a side can lose ({})", wickets, max_wickets);
    }

    let overs = Overs::parse(overs, settings.balls_per_over)?;
    if overs.total_balls(settings.balls_per_over) > settings.total_overs * settings.balls_per_over {
        bail!("{} overs is more than the {} scheduled", overs, settings.total_overs);
    }
    Ok(InningsSummary::new(runs, wickets, overs))
}

/// "150/5", or "150" for no wickets
fn parse_score(score: &str) -> Result<(u32, u32)> {
    let (runs, wickets) = score.trim().split_once('/').unwrap_or((score.trim(), "0"));
    let runs = runs
        .trim()
        .parse()
        .with_context(|| format!("Invalid score: {}", score))?;
    let wickets = wickets
        .trim()
        .parse()
        .with_context(|| format!("Invalid score: {}", score))?;
    Ok((runs, wickets))
}
