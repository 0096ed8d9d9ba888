use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::config::MatchSettings;
use crate::error::{Error, Result};
use crate::state::{Batsman, Bowler, Innings, MatchResult, Team, TeamSide};

/// Innings lifecycle
///
/// ## State Transition Rules
///
/// - FirstInnings -> FirstInningsEnded (overs exhausted or all out)
/// - FirstInningsEnded -> SecondInnings (explicit confirmation)
/// - SecondInnings -> MatchEnded (target reached, overs exhausted or all out)
///
/// `MatchEnded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr)]
pub enum InningsPhase {
    #[default]
    FirstInnings,
    FirstInningsEnded,
    SecondInnings,
    MatchEnded,
}

impl InningsPhase {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Whether deliveries can be scored
    pub fn is_active(&self) -> bool {
        matches!(self, Self::FirstInnings | Self::SecondInnings)
    }
}

impl std::fmt::Display for InningsPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accumulators for the over in progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverProgress {
    pub tokens: Vec<String>,
    /// Everything scored in the over, byes included
    pub runs: u32,
    /// Runs charged to the bowler
    pub conceded: u32,
    pub wickets: u32,
    /// A wide or no-ball was bowled
    pub had_illegal: bool,
}

/// The whole live scoring state. Replaced wholesale by every scoring
/// operation, which makes it the unit of undo and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub settings: MatchSettings,
    pub team_a: Team,
    pub team_b: Team,
    pub phase: InningsPhase,
    /// 0 until the second innings starts
    pub target: u32,
    /// The live innings (or the last one, once the match has ended)
    pub innings: Innings,
    pub first_innings: Option<Innings>,
    pub striker_id: u32,
    pub non_striker_id: u32,
    pub bowler_id: u32,
    /// Bowler of the last completed over; cannot bowl the next one
    pub previous_bowler_id: Option<u32>,
    pub over: OverProgress,
    pub result: Option<MatchResult>,
}

impl MatchState {
    pub fn new(settings: MatchSettings, team_a: &Team, team_b: &Team) -> Result<Self> {
        settings.validate()?;
        let team_a = team_a.padded(settings.players_per_team)?;
        let team_b = team_b.padded(settings.players_per_team)?;
        if team_a.name == team_b.name {
            return Err(Error::InvalidTeam(format!(
                "both teams are named {}",
                team_a.name
            )));
        }

        let innings = Innings::new(&team_a, &team_b);
        Ok(Self {
            settings,
            team_a,
            team_b,
            phase: InningsPhase::FirstInnings,
            target: 0,
            innings,
            first_innings: None,
            striker_id: 1,
            non_striker_id: 2,
            bowler_id: 1,
            previous_bowler_id: None,
            over: OverProgress::default(),
            result: None,
        })
    }

    /// Check a state that did not come from `new`, such as a deserialized
    /// snapshot, before scoring continues on it.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        for id in [self.striker_id, self.non_striker_id] {
            if self.innings.batsman(id).is_none() {
                return Err(Error::InvalidSnapshot(format!("no batsman with id {}", id)));
            }
        }
        if self.striker_id == self.non_striker_id {
            return Err(Error::InvalidSnapshot(format!(
                "batsman {} is at both ends",
                self.striker_id
            )));
        }
        let bowlers = std::iter::once(self.bowler_id).chain(self.previous_bowler_id);
        for id in bowlers {
            if self.innings.bowler(id).is_none() {
                return Err(Error::InvalidSnapshot(format!("no bowler with id {}", id)));
            }
        }
        Ok(())
    }

    /// 1 or 2
    pub fn innings_number(&self) -> u8 {
        match self.phase {
            InningsPhase::FirstInnings | InningsPhase::FirstInningsEnded => 1,
            InningsPhase::SecondInnings | InningsPhase::MatchEnded => {
                if self.first_innings.is_some() { 2 } else { 1 }
            }
        }
    }

    pub fn is_chasing(&self) -> bool {
        self.phase == InningsPhase::SecondInnings
    }

    pub fn runs(&self) -> u32 {
        self.innings.runs
    }

    pub fn wickets(&self) -> u32 {
        self.innings.wickets
    }

    pub fn balls(&self) -> u32 {
        self.innings.balls
    }

    pub fn batting_side(&self) -> TeamSide {
        if self.innings_number() == 1 {
            TeamSide::A
        } else {
            TeamSide::B
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    pub fn batting_team(&self) -> &Team {
        self.team(self.batting_side())
    }

    pub fn bowling_team(&self) -> &Team {
        self.team(self.batting_side().opponent())
    }

    pub fn striker(&self) -> Option<&Batsman> {
        self.innings.batsman(self.striker_id)
    }

    pub fn non_striker(&self) -> Option<&Batsman> {
        self.innings.batsman(self.non_striker_id)
    }

    pub fn bowler(&self) -> Option<&Bowler> {
        self.innings.bowler(self.bowler_id)
    }

    /// Legal deliveries bowled in the over in progress
    pub fn balls_in_over(&self) -> u32 {
        self.innings.balls % self.settings.balls_per_over
    }

    pub fn balls_remaining(&self) -> u32 {
        self.settings.max_balls().saturating_sub(self.innings.balls)
    }

    pub fn current_run_rate(&self) -> f64 {
        self.innings.run_rate(self.settings.balls_per_over)
    }

    /// Runs still needed by the chasing side
    pub fn runs_needed(&self) -> Option<u32> {
        self.is_chasing()
            .then(|| self.target.saturating_sub(self.innings.runs))
    }

    /// Runs per over needed to reach the target
    pub fn required_run_rate(&self) -> Option<f64> {
        let needed = self.runs_needed()?;
        let remaining = self.balls_remaining();
        if remaining == 0 {
            return None;
        }
        Some(needed as f64 * self.settings.balls_per_over as f64 / remaining as f64)
    }

    pub(crate) fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker_id, &mut self.non_striker_id);
    }

    /// Relabel a player in the roster and in every innings record that
    /// refers to their id.
    pub(crate) fn rename_player(&mut self, side: TeamSide, id: u32, name: &str) -> Result<()> {
        let team = match side {
            TeamSide::A => &mut self.team_a,
            TeamSide::B => &mut self.team_b,
        };
        let slot = id
            .checked_sub(1)
            .and_then(|index| team.players.get_mut(index as usize))
            .ok_or(Error::UnknownPlayer(id))?;
        *slot = name.to_string();

        let team_name = team.name.clone();
        let innings = self.first_innings.iter_mut().chain(std::iter::once(&mut self.innings));
        for innings in innings {
            if innings.batting_team == team_name {
                if let Some(batsman) = innings.batsman_mut(id) {
                    batsman.name = name.to_string();
                }
                for fall in &mut innings.fall_of_wickets {
                    if fall.batsman_id == id {
                        fall.batsman_name = name.to_string();
                    }
                }
            }
            if innings.bowling_team == team_name {
                if let Some(bowler) = innings.bowler_mut(id) {
                    bowler.name = name.to_string();
                }
                for over in &mut innings.over_history {
                    if over.bowler_id == id {
                        over.bowler_name = name.to_string();
                    }
                }
            }
        }
        Ok(())
    }
}
