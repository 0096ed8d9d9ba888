use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nrr::calculator::round_to;
use crate::nrr::{InningsSummary, NrrSettings};
use crate::session::MatchRecord;

/// Points for a win
pub const WIN_POINTS: u32 = 2;
/// Points for a tie
pub const TIE_POINTS: u32 = 1;

/// One row of the points table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub points: u32,
    pub runs_scored: u32,
    /// Cumulative adjusted overs faced
    pub overs_faced: f64,
    pub runs_conceded: u32,
    /// Cumulative adjusted overs bowled
    pub overs_bowled: f64,
}

impl TeamStanding {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            ..Default::default()
        }
    }

    /// Tournament NRR, rounded to 3 decimals
    pub fn nrr(&self) -> f64 {
        if self.overs_faced <= 0.0 || self.overs_bowled <= 0.0 {
            return 0.0;
        }
        let rate_for = self.runs_scored as f64 / self.overs_faced;
        let rate_against = self.runs_conceded as f64 / self.overs_bowled;
        round_to(rate_for - rate_against, 3)
    }

    fn add_innings(&mut self, batted: &InningsSummary, bowled: &InningsSummary, settings: &NrrSettings) {
        self.played += 1;
        self.runs_scored += batted.runs;
        self.overs_faced += batted.overs_for_nrr(settings);
        self.runs_conceded += bowled.runs;
        self.overs_bowled += bowled.overs_for_nrr(settings);
    }
}

/// Points table built from completed match records
#[derive(Debug, Clone, Default)]
pub struct Standings {
    teams: HashMap<String, TeamStanding>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a MatchRecord>) -> Self {
        let mut standings = Self::new();
        for record in records {
            standings.add(record);
        }
        standings
    }

    pub fn add(&mut self, record: &MatchRecord) {
        let settings = NrrSettings::from(&record.settings);
        let (first, second) = record.summaries();
        let team_a = record.team_a().to_string();
        let team_b = record.team_b().to_string();

        self.entry(&team_a).add_innings(&first, &second, &settings);
        self.entry(&team_b).add_innings(&second, &first, &settings);

        match record.outcome.winner() {
            Some(winner) => {
                let loser = if winner == team_a { &team_b } else { &team_a };
                let winner = winner.to_string();
                let row = self.entry(&winner);
                row.won += 1;
                row.points += WIN_POINTS;
                self.entry(loser).lost += 1;
            }
            None => {
                for team in [&team_a, &team_b] {
                    let row = self.entry(team);
                    row.tied += 1;
                    row.points += TIE_POINTS;
                }
            }
        }
        debug!("Standings updated: {} v {} ({})", team_a, team_b, record.result);
    }

    fn entry(&mut self, team: &str) -> &mut TeamStanding {
        self.teams
            .entry(team.to_string())
            .or_insert_with(|| TeamStanding::new(team))
    }

    pub fn get(&self, team: &str) -> Option<&TeamStanding> {
        self.teams.get(team)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Rows ordered by points, then NRR, then team name
    pub fn table(&self) -> Vec<&TeamStanding> {
        let mut rows: Vec<_> = self.teams.values().collect();
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.nrr().total_cmp(&a.nrr()))
                .then_with(|| a.team.cmp(&b.team))
        });
        rows
    }
}
