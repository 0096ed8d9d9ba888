use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::state::Overs;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DismissalType {
    #[strum(to_string = "Bowled")]
    Bowled,
    #[strum(to_string = "Caught")]
    Caught,
    #[strum(to_string = "LBW")]
    Lbw,
    #[strum(to_string = "Stumped")]
    Stumped,
    #[strum(to_string = "Hit Wicket", serialize = "hitwicket", serialize = "hit-wicket")]
    HitWicket,
    #[strum(to_string = "Run Out", serialize = "runout", serialize = "run-out")]
    RunOut,
}

impl DismissalType {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Whether the bowler is credited with the wicket
    pub fn credits_bowler(&self) -> bool {
        !matches!(self, Self::RunOut)
    }
}

impl std::fmt::Display for DismissalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Batting figures for one player in one innings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batsman {
    /// Batting-order position, starting at 1
    pub id: u32,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub is_out: bool,
    pub is_retired: bool,
    pub out_type: Option<DismissalType>,
}

impl Batsman {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            is_retired: false,
            out_type: None,
        }
    }

    pub(crate) fn credit_runs(&mut self, runs: u32) {
        self.runs += runs;
        match runs {
            4 => self.fours += 1,
            6 => self.sixes += 1,
            _ => {}
        }
    }

    pub(crate) fn dismiss(&mut self, how: DismissalType) {
        self.is_out = true;
        self.out_type = Some(how);
    }

    /// Runs per 100 balls
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.runs as f64 * 100.0 / self.balls as f64
    }

    /// "not out", "retired" or the dismissal
    pub fn status(&self) -> &'static str {
        match (self.out_type, self.is_retired) {
            (Some(how), _) => how.as_str(),
            (None, true) => "retired",
            (None, false) => "not out",
        }
    }
}

/// Bowling figures for one player in one innings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bowler {
    pub id: u32,
    pub name: String,
    /// Legal deliveries bowled
    pub balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub maidens: u32,
}

impl Bowler {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            balls: 0,
            runs_conceded: 0,
            wickets: 0,
            maidens: 0,
        }
    }

    pub fn overs(&self, balls_per_over: u32) -> Overs {
        Overs::from_balls(self.balls, balls_per_over)
    }

    /// Runs conceded per over
    pub fn economy(&self, balls_per_over: u32) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.runs_conceded as f64 / (self.balls as f64 / balls_per_over as f64)
    }

    pub fn format_economy(&self, balls_per_over: u32) -> String {
        format!("{:.2}", self.economy(balls_per_over))
    }
}
