use serde::{Deserialize, Serialize};

use crate::config::MatchSettings;
use crate::state::{Innings, Overs};

/// Match parameters the NRR calculation depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NrrSettings {
    pub total_overs: u32,
    pub balls_per_over: u32,
    pub players_per_team: u32,
}

impl From<&MatchSettings> for NrrSettings {
    fn from(settings: &MatchSettings) -> Self {
        Self {
            total_overs: settings.overs,
            balls_per_over: settings.balls_per_over,
            players_per_team: settings.players_per_team,
        }
    }
}

impl Default for NrrSettings {
    fn default() -> Self {
        (&MatchSettings::default()).into()
    }
}

/// A completed innings as far as NRR is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsSummary {
    pub runs: u32,
    pub wickets: u32,
    pub overs: Overs,
}

impl InningsSummary {
    pub fn new(runs: u32, wickets: u32, overs: Overs) -> Self {
        Self {
            runs,
            wickets,
            overs,
        }
    }

    pub fn from_innings(innings: &Innings, balls_per_over: u32) -> Self {
        Self::new(innings.runs, innings.wickets, innings.overs(balls_per_over))
    }

    pub fn is_all_out(&self, settings: &NrrSettings) -> bool {
        self.wickets >= settings.players_per_team.saturating_sub(1)
    }

    /// Overs faced for NRR: a side bowled out is charged the full quota
    pub fn overs_for_nrr(&self, settings: &NrrSettings) -> f64 {
        if self.is_all_out(settings) {
            settings.total_overs as f64
        } else {
            self.overs.as_decimal(settings.balls_per_over)
        }
    }
}

/// NRR figures for one side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamNrr {
    pub runs_scored: u32,
    /// Adjusted overs faced
    pub overs_faced: f64,
    pub runs_conceded: u32,
    /// Adjusted overs faced by the opposition
    pub overs_bowled: f64,
    /// Rounded to 2 decimals
    pub run_rate_for: f64,
    /// Rounded to 2 decimals
    pub run_rate_against: f64,
    /// Rounded to 3 decimals
    pub nrr: f64,
}

impl TeamNrr {
    pub fn formatted_nrr(&self) -> String {
        format_nrr(self.nrr)
    }
}

/// NRR for both sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NrrReport {
    /// The side that batted first
    pub team_a: TeamNrr,
    pub team_b: TeamNrr,
}

/// Compute net run rate for both sides of a completed match.
///
/// Returns `None` if either side's adjusted overs faced is zero.
pub fn calculate_nrr(
    first: &InningsSummary,
    second: &InningsSummary,
    settings: &NrrSettings,
) -> Option<NrrReport> {
    let overs_a = first.overs_for_nrr(settings);
    let overs_b = second.overs_for_nrr(settings);
    if overs_a <= 0.0 || overs_b <= 0.0 {
        return None;
    }

    let rate_a = first.runs as f64 / overs_a;
    let rate_b = second.runs as f64 / overs_b;

    let team = |runs_scored, overs_faced, rate_for: f64, runs_conceded, overs_bowled, rate_against: f64| {
        TeamNrr {
            runs_scored,
            overs_faced,
            runs_conceded,
            overs_bowled,
            run_rate_for: round_to(rate_for, 2),
            run_rate_against: round_to(rate_against, 2),
            nrr: round_to(rate_for - rate_against, 3),
        }
    };

    Some(NrrReport {
        team_a: team(first.runs, overs_a, rate_a, second.runs, overs_b, rate_b),
        team_b: team(second.runs, overs_b, rate_b, first.runs, overs_a, rate_a),
    })
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// "7.50"
pub fn format_run_rate(rate: f64) -> String {
    format!("{:.2}", rate)
}

/// "+0.736" / "-0.736"
pub fn format_nrr(nrr: f64) -> String {
    // -0.0 would print as "-0.000"
    let nrr = if nrr == 0.0 { 0.0 } else { nrr };
    format!("{:+.3}", nrr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(runs: u32, wickets: u32, overs: &str) -> InningsSummary {
        InningsSummary::new(runs, wickets, Overs::parse(overs, 6).unwrap())
    }

    #[test]
    fn test_not_all_out_uses_actual_overs() {
        let settings = NrrSettings::default();
        let chase = summary(151, 3, "18.2");
        assert!((chase.overs_for_nrr(&settings) - 18.3333).abs() < 0.001);
    }

    #[test]
    fn test_all_out_charged_full_overs() {
        let settings = NrrSettings::default();
        let innings = summary(120, 10, "18.4");
        assert!(innings.is_all_out(&settings));
        assert_eq!(innings.overs_for_nrr(&settings), 20.0);
    }

    #[test]
    fn test_report_values() {
        let report = calculate_nrr(
            &summary(150, 5, "20.0"),
            &summary(151, 3, "18.2"),
            &NrrSettings::default(),
        )
        .unwrap();

        assert_eq!(report.team_a.overs_faced, 20.0);
        assert_eq!(report.team_a.run_rate_for, 7.5);
        assert_eq!(report.team_a.run_rate_against, 8.24);
        assert_eq!(report.team_a.nrr, -0.736);
        assert_eq!(report.team_b.nrr, 0.736);
        assert_eq!(report.team_a.formatted_nrr(), "-0.736");
        assert_eq!(report.team_b.formatted_nrr(), "+0.736");
        assert_eq!(report.team_a.overs_bowled, report.team_b.overs_faced);
    }

    #[test]
    fn test_zero_overs_has_no_result() {
        let report = calculate_nrr(
            &summary(0, 0, "0.0"),
            &summary(10, 0, "1.0"),
            &NrrSettings::default(),
        );
        assert!(report.is_none());
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_run_rate(7.5), "7.50");
        assert_eq!(format_nrr(0.0), "+0.000");
        assert_eq!(format_nrr(-0.0), "+0.000");
        assert_eq!(format_nrr(1.2), "+1.200");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(8.236363, 2), 8.24);
        assert_eq!(round_to(-0.73636, 3), -0.736);
    }
}
