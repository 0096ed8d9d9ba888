use tracing::{debug, info, warn};

use crate::config::{MatchConfig, MatchSettings};
use crate::error::{Error, Result};
use crate::scoring::{self, BallEvent, Crease, InningsLifecycle, UndoLedger};
use crate::session::MatchRecord;
use crate::state::{MatchState, Team, TeamSide};

/// Live scoring session: the current state plus its undo history.
///
/// Every mutating call snapshots the state first and replaces it wholesale
/// on success. A rejected call leaves both the state and the history as
/// they were.
#[derive(Debug, Clone)]
pub struct ScoringSession {
    state: MatchState,
    ledger: UndoLedger,
}

impl ScoringSession {
    pub fn new(settings: MatchSettings, team_a: &Team, team_b: &Team) -> Result<Self> {
        let state = MatchState::new(settings, team_a, team_b)?;
        info!(
            "New match: {} v {} ({} overs)",
            state.team_a.name, state.team_b.name, settings.overs
        );
        Ok(Self::with_state(state))
    }

    pub fn from_config(config: &MatchConfig) -> Result<Self> {
        Self::new(config.settings, &config.team_a, &config.team_b)
    }

    /// Continue from a persisted snapshot. Undo history starts empty.
    pub fn resume(state: MatchState) -> Result<Self> {
        state.validate()?;
        debug!("Resuming {} v {}", state.team_a.name, state.team_b.name);
        Ok(Self::with_state(state))
    }

    fn with_state(state: MatchState) -> Self {
        Self {
            state,
            ledger: UndoLedger::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Record one delivery
    pub fn score(&mut self, event: &BallEvent) -> Result<&MatchState> {
        self.commit(format!("Ball: {}", event), |state| scoring::apply(event, state))
    }

    pub fn change_bowler(&mut self, bowler_id: u32) -> Result<&MatchState> {
        self.commit(format!("Bowler: {}", bowler_id), |state| {
            scoring::change_bowler(state, bowler_id)
        })
    }

    pub fn swap_strike(&mut self) -> Result<&MatchState> {
        self.commit("Swap strike", scoring::swap_strike)
    }

    pub fn retire(&mut self, crease: Crease) -> Result<&MatchState> {
        self.commit(format!("Retire: {}", crease), |state| {
            scoring::retire(state, crease)
        })
    }

    pub fn start_second_innings(&mut self) -> Result<&MatchState> {
        self.commit(
            "Start second innings",
            InningsLifecycle::start_second_innings,
        )
    }

    pub fn rename_player(&mut self, side: TeamSide, id: u32, name: &str) -> Result<&MatchState> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidTeam("player name cannot be empty".into()));
        }
        self.commit(format!("Rename: {}", name), |state| {
            let mut next = state.clone();
            next.rename_player(side, id, name)?;
            Ok(next)
        })
    }

    /// Revert the most recent operation, returning its label
    pub fn undo(&mut self) -> Result<String> {
        let snapshot = self.ledger.undo().ok_or(Error::NothingToUndo)?;
        info!("Undo: {}", snapshot.label);
        self.state = snapshot.state;
        Ok(snapshot.label)
    }

    pub fn can_undo(&self) -> bool {
        !self.ledger.is_empty()
    }

    /// Undo labels, oldest first
    pub fn history(&self) -> Vec<String> {
        self.ledger.labels().map(str::to_string).collect()
    }

    /// Live state for mid-match persistence
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    pub fn final_record(&self) -> Result<MatchRecord> {
        MatchRecord::from_state(&self.state)
    }

    fn commit<F>(&mut self, label: impl Into<String>, op: F) -> Result<&MatchState>
    where
        F: FnOnce(&MatchState) -> Result<MatchState>,
    {
        let label = label.into();
        match op(&self.state) {
            Ok(next) => {
                debug!("{} -> {}", label, next.innings.score_line());
                self.ledger.push(label, &self.state);
                self.state = next;
                Ok(&self.state)
            }
            Err(e) => {
                warn!("Rejected {}: {}", label, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DismissalType, InningsPhase};

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
    fn test_score_and_undo() {
        let mut session = session();
        let before = session.snapshot();

        session.score(&BallEvent::Runs(4)).unwrap();
        assert_eq!(session.state().runs(), 4);
        assert!(session.can_undo());
        assert_eq!(session.history(), vec!["Ball: 4".to_string()]);

        assert_eq!(session.undo().unwrap(), "Ball: 4");
        assert_eq!(session.state(), &before);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_empty_is_reported() {
        let mut session = session();
        assert!(matches!(session.undo(), Err(Error::NothingToUndo)));
    }

    #[test]
    fn test_rejected_call_keeps_state_and_history() {
        let mut session = session();
        session.score(&BallEvent::Runs(1)).unwrap();
        let before = session.snapshot();

        let result = session.score(&BallEvent::Wicket {
            dismissal: None,
            batsman: None,
            runs: 0,
        });
        assert!(matches!(result, Err(Error::MissingDismissal)));
        assert_eq!(session.state(), &before);
        assert_eq!(session.history().len(), 1);

        assert!(session.change_bowler(2).is_err());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_undo_across_innings_boundary() {
        let mut session = session();
        for _ in 0..5 {
            session.score(&BallEvent::Runs(0)).unwrap();
        }
        let before = session.snapshot();
        session.score(&BallEvent::Runs(2)).unwrap();
        assert_eq!(session.state().phase, InningsPhase::FirstInningsEnded);

        session.undo().unwrap();
        assert_eq!(session.state(), &before);
        assert_eq!(session.state().phase, InningsPhase::FirstInnings);
    }

    #[test]
    fn test_full_match_record() {
        let mut session = session();
        for _ in 0..6 {
            session.score(&BallEvent::Runs(1)).unwrap();
        }
        assert!(matches!(session.final_record(), Err(Error::MatchNotFinished)));

        session.start_second_innings().unwrap();
        assert_eq!(session.state().target, 7);
        session.score(&BallEvent::Runs(6)).unwrap();
        session
            .score(&BallEvent::wicket(DismissalType::Bowled))
            .unwrap();
        session.score(&BallEvent::Runs(1)).unwrap();

        let record = session.final_record().unwrap();
        assert_eq!(record.result, "Herons won by 1 wicket");
        assert_eq!(record.innings1.runs, 6);
        assert_eq!(record.innings2.runs, 7);
    }

    #[test]
    fn test_rename_is_undoable() {
        let mut session = session();
        session.rename_player(TeamSide::A, 1, "Asha").unwrap();
        assert_eq!(session.state().striker().unwrap().name, "Asha");
        session.undo().unwrap();
        assert_eq!(session.state().striker().unwrap().name, "Player 1");
        assert!(session.rename_player(TeamSide::A, 1, "  ").is_err());
    }

    #[test]
    fn test_swap_and_retire() {
        let mut session = session();
        session.swap_strike().unwrap();
        assert_eq!(session.state().striker_id, 2);
        session.retire(Crease::Striker).unwrap();
        assert_eq!(session.state().striker_id, 3);
        assert!(session.state().innings.batsman(2).unwrap().is_retired);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_to_json_resumes() {
        let mut session = session();
        session.score(&BallEvent::wide(1)).unwrap();
        let json = session.to_json().unwrap();
        let state: MatchState = serde_json::from_str(&json).unwrap();
        let resumed = ScoringSession::resume(state).unwrap();
        assert_eq!(resumed.state(), session.state());
        assert!(!resumed.can_undo());
    }

    #[test]
    fn test_resume_rejects_broken_snapshot() {
        let mut state = session().snapshot();
        state.settings.balls_per_over = 0;
        assert!(matches!(
            ScoringSession::resume(state),
            Err(Error::InvalidSettings(_))
        ));

        let mut state = session().snapshot();
        state.bowler_id = 42;
        assert!(matches!(
            ScoringSession::resume(state),
            Err(Error::InvalidSnapshot(_))
        ));
    }
}
