use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::state::{Innings, InningsPhase, MatchResult, MatchState, OverProgress, WinMargin};

/// Transition fired by a delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    InningsEnded,
    MatchEnded(MatchResult),
}

/// Innings lifecycle checks
///
/// Checks read the state with the current delivery already applied, so
/// totals at an innings or match boundary always include the ball that
/// caused it.
pub struct InningsLifecycle;

impl InningsLifecycle {
    /// Check if a state transition is valid
    pub fn is_valid_transition(from: InningsPhase, to: InningsPhase) -> bool {
        if from == to {
            return true;
        }

        matches!(
            (from, to),
            (InningsPhase::FirstInnings, InningsPhase::FirstInningsEnded)
                | (InningsPhase::FirstInningsEnded, InningsPhase::SecondInnings)
                | (InningsPhase::SecondInnings, InningsPhase::MatchEnded)
        )
    }

    /// Overs exhausted or all out
    pub fn innings_complete(state: &MatchState) -> bool {
        let settings = &state.settings;
        state.innings.balls >= settings.max_balls()
            || state.innings.wickets >= settings.max_wickets()
    }

    /// Determine whether the live innings or the match has just ended
    pub fn check(state: &MatchState) -> Option<Transition> {
        match state.phase {
            InningsPhase::FirstInnings => {
                Self::innings_complete(state).then_some(Transition::InningsEnded)
            }
            InningsPhase::SecondInnings => Self::chase_result(state).map(Transition::MatchEnded),
            InningsPhase::FirstInningsEnded | InningsPhase::MatchEnded => None,
        }
    }

    fn chase_result(state: &MatchState) -> Option<MatchResult> {
        let innings = &state.innings;
        if innings.runs >= state.target {
            return Some(MatchResult::Won {
                winner: innings.batting_team.clone(),
                margin: WinMargin::Wickets(state.settings.max_wickets() - innings.wickets),
            });
        }
        if !Self::innings_complete(state) {
            return None;
        }

        let par = state.target - 1;
        if innings.runs == par {
            Some(MatchResult::Tie)
        } else {
            Some(MatchResult::Won {
                winner: innings.bowling_team.clone(),
                margin: WinMargin::Runs(par - innings.runs),
            })
        }
    }

    pub(crate) fn apply(state: &mut MatchState, transition: Transition) {
        let to = match transition {
            Transition::InningsEnded => InningsPhase::FirstInningsEnded,
            Transition::MatchEnded(_) => InningsPhase::MatchEnded,
        };
        if !Self::is_valid_transition(state.phase, to) {
            warn!(
                "Invalid phase transition: {} -> {}, keeping {}",
                state.phase, to, state.phase
            );
            return;
        }

        match transition {
            Transition::InningsEnded => {
                info!(
                    "First innings ended: {} {} ({} overs)",
                    state.innings.batting_team,
                    state.innings.score_line(),
                    state.innings.overs(state.settings.balls_per_over)
                );
            }
            Transition::MatchEnded(result) => {
                info!("Match ended: {}", result);
                state.result = Some(result);
            }
        }
        state.phase = to;
    }

    /// Freeze the first innings and set up the chase.
    pub fn start_second_innings(state: &MatchState) -> Result<MatchState> {
        if state.phase != InningsPhase::FirstInningsEnded {
            return Err(Error::SecondInningsOutOfOrder);
        }

        let mut next = state.clone();
        let first = std::mem::replace(&mut next.innings, Innings::new(&state.team_b, &state.team_a));
        next.target = first.runs + 1;
        next.first_innings = Some(first);
        next.striker_id = 1;
        next.non_striker_id = 2;
        next.bowler_id = 1;
        next.previous_bowler_id = None;
        next.over = OverProgress::default();
        next.phase = InningsPhase::SecondInnings;

        info!(
            "Second innings started: {} need {} to win",
            next.innings.batting_team, next.target
        );
        Ok(next)
    }
}
