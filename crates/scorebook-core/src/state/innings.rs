use serde::{Deserialize, Serialize};

use crate::state::{Batsman, Bowler, Overs, Team};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub batsman_id: u32,
    pub batsman_name: String,
    /// Team score when the wicket fell
    pub score: u32,
    /// Wicket number (1 for the first wicket)
    pub wicket: u32,
    /// Overs at the fall, "O.B"
    pub over: String,
}

/// A closed over in the over history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverSummary {
    /// 1-based over number
    pub over_number: u32,
    pub bowler_id: u32,
    pub bowler_name: String,
    /// Display tokens, one per delivery including wides and no-balls
    pub balls: Vec<String>,
    pub runs: u32,
    pub wickets: u32,
    pub maiden: bool,
}

/// One side's innings. Frozen once the innings ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Innings {
    pub batting_team: String,
    pub bowling_team: String,
    pub runs: u32,
    pub wickets: u32,
    /// Legal deliveries faced
    pub balls: u32,
    pub over_history: Vec<OverSummary>,
    pub extras: Extras,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub batting: Vec<Batsman>,
    pub bowling: Vec<Bowler>,
}

impl Innings {
    pub fn new(batting: &Team, bowling: &Team) -> Self {
        Self {
            batting_team: batting.name.clone(),
            bowling_team: bowling.name.clone(),
            runs: 0,
            wickets: 0,
            balls: 0,
            over_history: Vec::new(),
            extras: Extras::default(),
            fall_of_wickets: Vec::new(),
            batting: (1..)
                .zip(&batting.players)
                .map(|(id, name)| Batsman::new(id, name.as_str()))
                .collect(),
            bowling: (1..)
                .zip(&bowling.players)
                .map(|(id, name)| Bowler::new(id, name.as_str()))
                .collect(),
        }
    }

    pub fn overs(&self, balls_per_over: u32) -> Overs {
        Overs::from_balls(self.balls, balls_per_over)
    }

    pub fn batsman(&self, id: u32) -> Option<&Batsman> {
        self.batting.iter().find(|b| b.id == id)
    }

    pub fn batsman_mut(&mut self, id: u32) -> Option<&mut Batsman> {
        self.batting.iter_mut().find(|b| b.id == id)
    }

    pub fn bowler(&self, id: u32) -> Option<&Bowler> {
        self.bowling.iter().find(|b| b.id == id)
    }

    pub fn bowler_mut(&mut self, id: u32) -> Option<&mut Bowler> {
        self.bowling.iter_mut().find(|b| b.id == id)
    }

    /// Runs scored off the bat, excluding extras
    pub fn batting_runs(&self) -> u32 {
        self.batting.iter().map(|b| b.runs).sum()
    }

    /// Runs per over
    pub fn run_rate(&self, balls_per_over: u32) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.runs as f64 / self.overs(balls_per_over).as_decimal(balls_per_over)
    }

    /// "142/6"
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.runs, self.wickets)
    }
}
