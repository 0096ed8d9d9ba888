//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::config::MatchSettings;
use crate::nrr::{NrrReport, Standings, TeamNrr, format_nrr, format_run_rate};
use crate::state::{Batsman, DismissalType, Innings, MatchResult, MatchState, OverSummary};

const MIN_BORDER_WIDTH: usize = 56;

/// Format an innings scorecard for console display
///
/// Batting, extras, fall of wickets, bowling and over-by-over history in a
/// boxed layout.
pub fn format_innings_console(innings: &Innings, settings: &MatchSettings) -> String {
    let bpo = settings.balls_per_over;
    let mut output = String::new();

    let title = format!(
        "{} {} ({} overs)",
        innings.batting_team,
        innings.score_line(),
        innings.overs(bpo)
    );
    let border = "━".repeat(title.chars().count().max(MIN_BORDER_WIDTH) + 4);
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "  {}", title.bold());
    let _ = writeln!(output, "{}", border_dim);

    let _ = writeln!(
        output,
        "  {:<20} {:<12} {:>4} {:>4} {:>3} {:>3} {:>7}",
        "BATTING", "", "R", "B", "4s", "6s", "SR"
    );
    for batsman in innings.batting.iter().filter(|b| has_batted(b)) {
        let _ = writeln!(
            output,
            "  {:<20} {:<12} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            batsman.name,
            format_colored_status(batsman),
            batsman.runs,
            batsman.balls,
            batsman.fours,
            batsman.sixes,
            batsman.strike_rate()
        );
    }

    let extras = &innings.extras;
    let _ = writeln!(
        output,
        "  EXTRAS : {} (wd {}, nb {}, b {}, lb {})",
        extras.total, extras.wides, extras.no_balls, extras.byes, extras.leg_byes
    );
    let _ = writeln!(
        output,
        "  TOTAL  : {} ({} overs, RR {})",
        innings.score_line().bold(),
        innings.overs(bpo),
        format_run_rate(innings.run_rate(bpo))
    );

    if !innings.fall_of_wickets.is_empty() {
        let falls: Vec<String> = innings
            .fall_of_wickets
            .iter()
            .map(|f| format!("{}-{} ({}, {})", f.score, f.wicket, f.batsman_name, f.over))
            .collect();
        let _ = writeln!(output, "  FOW    : {}", falls.join(", "));
    }

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  {:<20} {:>6} {:>3} {:>4} {:>3} {:>7}",
        "BOWLING", "O", "M", "R", "W", "ECON"
    );
    for bowler in innings.bowling.iter().filter(|b| b.balls > 0) {
        let _ = writeln!(
            output,
            "  {:<20} {:>6} {:>3} {:>4} {:>3} {:>7}",
            bowler.name,
            bowler.overs(bpo).to_string(),
            bowler.maidens,
            bowler.runs_conceded,
            bowler.wickets,
            bowler.format_economy(bpo)
        );
    }

    if !innings.over_history.is_empty() {
        let _ = writeln!(output, "{}", border_dim);
        for over in &innings.over_history {
            let _ = writeln!(output, "  {}", format_over_line(over));
        }
    }
    let _ = write!(output, "{}", border_dim);

    output
}

/// One-line live status, e.g.
/// `Herons 45/2 (6.3) CRR 6.92 | Asha* 20 (15) Ben 10 (8) | Kit 1.3-0-12-1 | need 30 off 81`
pub fn format_live_status(state: &MatchState) -> String {
    let bpo = state.settings.balls_per_over;
    let innings = &state.innings;

    let mut status = format!(
        "{} {} ({}) CRR {}",
        innings.batting_team,
        innings.score_line().bold(),
        innings.overs(bpo),
        format_run_rate(state.current_run_rate())
    );

    if state.phase.is_active() {
        let batter = |b: Option<&Batsman>, mark: &str| {
            b.map(|b| format!("{}{} {} ({})", b.name, mark, b.runs, b.balls))
                .unwrap_or_default()
        };
        let _ = write!(
            status,
            " | {} {}",
            batter(state.striker(), "*"),
            batter(state.non_striker(), "")
        );
        if let Some(bowler) = state.bowler() {
            let _ = write!(
                status,
                " | {} {}-{}-{}-{}",
                bowler.name,
                bowler.overs(bpo),
                bowler.maidens,
                bowler.runs_conceded,
                bowler.wickets
            );
        }
        if !state.over.tokens.is_empty() {
            let _ = write!(status, " [{}]", state.over.tokens.join(" "));
        }
    }

    if let Some(needed) = state.runs_needed() {
        let _ = write!(
            status,
            " | need {} off {}",
            needed.yellow(),
            state.balls_remaining()
        );
        if let Some(rrr) = state.required_run_rate() {
            let _ = write!(status, " (RRR {})", format_run_rate(rrr));
        }
    }

    if let Some(result) = &state.result {
        let _ = write!(status, " | {}", format_result(result));
    } else if !state.phase.is_active() {
        let _ = write!(status, " | {}", "innings complete".dimmed());
    }

    status
}

/// Format a match result with color
pub fn format_result(result: &MatchResult) -> String {
    match result {
        MatchResult::Won { .. } => result.to_string().green().bold().to_string(),
        MatchResult::Tie => result.to_string().yellow().bold().to_string(),
    }
}

/// Format an NRR report for both sides
pub fn format_nrr_report(report: &NrrReport, team_a: &str, team_b: &str) -> String {
    let width = team_a.len().max(team_b.len()).max(8);
    let mut output = String::new();
    let _ = writeln!(
        output,
        "  {:<width$} {:>5} {:>7} {:>5} {:>7} {:>7} {:>7} {:>8}",
        "TEAM", "FOR", "OVERS", "AGST", "OVERS", "RR FOR", "RR AGST", "NRR"
    );
    let _ = writeln!(output, "{}", format_nrr_line(team_a, &report.team_a, width));
    let _ = write!(output, "{}", format_nrr_line(team_b, &report.team_b, width));
    output
}

fn format_nrr_line(team: &str, nrr: &TeamNrr, width: usize) -> String {
    format!(
        "  {:<width$} {:>5} {:>7.3} {:>5} {:>7.3} {:>7} {:>7} {:>8}",
        team,
        nrr.runs_scored,
        nrr.overs_faced,
        nrr.runs_conceded,
        nrr.overs_bowled,
        format_run_rate(nrr.run_rate_for),
        format_run_rate(nrr.run_rate_against),
        format_colored_nrr(nrr.nrr)
    )
}

/// Format the points table
pub fn format_standings(standings: &Standings) -> String {
    let table = standings.table();
    let width = table
        .iter()
        .map(|row| row.team.len())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut output = String::new();
    let _ = write!(
        output,
        "  {:<width$} {:>3} {:>3} {:>3} {:>3} {:>4} {:>8}",
        "TEAM", "P", "W", "L", "T", "PTS", "NRR"
    );
    for row in table {
        let _ = write!(
            output,
            "\n  {:<width$} {:>3} {:>3} {:>3} {:>3} {:>4} {:>8}",
            row.team,
            row.played,
            row.won,
            row.lost,
            row.tied,
            row.points.bold(),
            format_colored_nrr(row.nrr())
        );
    }
    output
}

/// Over line: "Over 3 (Kit): 1 0 Wd 4 0 0 1 - 7 runs, 0 wkts"
fn format_over_line(over: &OverSummary) -> String {
    let mut line = format!(
        "Over {} ({}): {} - {} runs, {} wkts",
        over.over_number,
        over.bowler_name,
        over.balls.join(" "),
        over.runs,
        over.wickets
    );
    if over.maiden {
        let _ = write!(line, " {}", "MAIDEN".cyan());
    }
    line
}

fn has_batted(batsman: &Batsman) -> bool {
    batsman.balls > 0 || batsman.is_out || batsman.is_retired || batsman.runs > 0
}

fn format_colored_status(batsman: &Batsman) -> String {
    let status = batsman.status();
    match batsman.out_type {
        Some(DismissalType::RunOut) => status.yellow().to_string(),
        Some(_) => status.red().to_string(),
        None if batsman.is_retired => status.dimmed().to_string(),
        None => status.green().to_string(),
    }
}

fn format_colored_nrr(nrr: f64) -> String {
    let text = format_nrr(nrr);
    if nrr > 0.0 {
        text.green().to_string()
    } else if nrr < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

/// Plain one-line summary for logging
pub fn format_innings_summary(innings: &Innings, balls_per_over: u32) -> String {
    format!(
        "{} {} ({} ov)",
        innings.batting_team,
        innings.score_line(),
        innings.overs(balls_per_over)
    )
}
