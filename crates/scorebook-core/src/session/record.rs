use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MatchSettings;
use crate::error::{Error, Result};
use crate::nrr::{InningsSummary, NrrReport, NrrSettings, calculate_nrr};
use crate::state::{Innings, InningsPhase, MatchResult, MatchState};

/// Final record of a completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Human-readable result, e.g. "Herons won by 7 wickets"
    pub result: String,
    pub outcome: MatchResult,
    pub innings1: Innings,
    pub innings2: Innings,
    pub total_overs: u32,
    pub settings: MatchSettings,
    pub completion_timestamp: DateTime<Utc>,
}

impl MatchRecord {
    pub fn from_state(state: &MatchState) -> Result<Self> {
        Self::from_state_at(state, Utc::now())
    }

    pub fn from_state_at(state: &MatchState, completed_at: DateTime<Utc>) -> Result<Self> {
        let (InningsPhase::MatchEnded, Some(outcome), Some(first)) =
            (state.phase, &state.result, &state.first_innings)
        else {
            return Err(Error::MatchNotFinished);
        };

        Ok(Self {
            result: outcome.to_string(),
            outcome: outcome.clone(),
            innings1: first.clone(),
            innings2: state.innings.clone(),
            total_overs: state.settings.overs,
            settings: state.settings,
            completion_timestamp: completed_at,
        })
    }

    /// Team that batted first
    pub fn team_a(&self) -> &str {
        &self.innings1.batting_team
    }

    pub fn team_b(&self) -> &str {
        &self.innings2.batting_team
    }

    pub fn summaries(&self) -> (InningsSummary, InningsSummary) {
        let bpo = self.settings.balls_per_over;
        (
            InningsSummary::from_innings(&self.innings1, bpo),
            InningsSummary::from_innings(&self.innings2, bpo),
        )
    }

    pub fn nrr(&self) -> Option<NrrReport> {
        let (first, second) = self.summaries();
        calculate_nrr(&first, &second, &NrrSettings::from(&self.settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Team, WinMargin};

    fn finished() -> MatchState {
        let settings = MatchSettings {
            overs: 2,
            players_per_team: 4,
            ..Default::default()
        };
        let mut state = MatchState::new(
            settings,
            &Team::new("Falcons", Vec::new()),
            &Team::new("Herons", Vec::new()),
        )
        .unwrap();
        let mut first = state.innings.clone();
        first.runs = 20;
        first.balls = 12;
        state.first_innings = Some(first);
        state.innings = Innings::new(&state.team_b, &state.team_a);
        state.innings.runs = 21;
        state.innings.wickets = 1;
        state.innings.balls = 10;
        state.target = 21;
        state.phase = InningsPhase::MatchEnded;
        state.result = Some(MatchResult::Won {
            winner: "Herons".into(),
            margin: WinMargin::Wickets(2),
        });
        state
    }

    #[test]
    fn test_record_from_finished_match() {
        let record = MatchRecord::from_state(&finished()).unwrap();
        assert_eq!(record.result, "Herons won by 2 wickets");
        assert_eq!(record.team_a(), "Falcons");
        assert_eq!(record.team_b(), "Herons");
        assert_eq!(record.total_overs, 2);
        assert_eq!(record.innings1.runs, 20);
        assert_eq!(record.innings2.runs, 21);
    }

    #[test]
    fn test_record_requires_finished_match() {
        let mut state = finished();
        state.phase = InningsPhase::SecondInnings;
        state.result = None;
        assert!(matches!(
            MatchRecord::from_state(&state),
            Err(Error::MatchNotFinished)
        ));
    }

    #[test]
    fn test_record_nrr() {
        let report = MatchRecord::from_state(&finished()).unwrap().nrr().unwrap();
        // 20 off 2.0 vs 21 off 1.4
        assert_eq!(report.team_a.run_rate_for, 10.0);
        assert_eq!(report.team_b.run_rate_for, 12.6);
        assert_eq!(report.team_b.nrr, 2.6);
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let record = MatchRecord::from_state(&finished()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: MatchRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
