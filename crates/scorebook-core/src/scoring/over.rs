//! Over tracking: per-over accumulators, over completion, maidens and the
//! no-consecutive-overs bowler rule.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::scoring::BallEvent;
use crate::state::{MatchState, OverProgress, OverSummary};

/// What one delivery adds to the over in progress
#[derive(Debug, Clone, Default)]
pub(crate) struct Delivery {
    pub token: String,
    pub runs: u32,
    pub conceded: u32,
    pub wickets: u32,
    pub illegal: bool,
}

pub(crate) fn record(state: &mut MatchState, delivery: Delivery) {
    let over = &mut state.over;
    over.tokens.push(delivery.token);
    over.runs += delivery.runs;
    over.conceded += delivery.conceded;
    over.wickets += delivery.wickets;
    over.had_illegal |= delivery.illegal;
}

/// `event`, already applied to `state`, was the last legal delivery of an over
pub fn is_over_complete(state: &MatchState, event: &BallEvent) -> bool {
    event.is_credited() && state.innings.balls > 0 && state.balls_in_over() == 0
}

/// Close the over that was just completed.
///
/// Appends it to the over history, bars its bowler from the next over,
/// rotates strike for the change of ends, and unless the innings is over
/// picks the next bowler.
pub(crate) fn complete_over(state: &mut MatchState, innings_over: bool) {
    let progress = std::mem::take(&mut state.over);
    let maiden = progress.conceded == 0 && !progress.had_illegal;
    let over_number = state.innings.balls / state.settings.balls_per_over;

    let bowler_id = state.bowler_id;
    let bowler_name = match state.innings.bowler_mut(bowler_id) {
        Some(bowler) => {
            if maiden {
                bowler.maidens += 1;
            }
            bowler.name.clone()
        }
        None => String::new(),
    };

    info!(
        "Over {} complete: {} runs, {} wicket(s){} ({})",
        over_number,
        progress.runs,
        progress.wickets,
        if maiden { ", maiden" } else { "" },
        bowler_name
    );
    state
        .innings
        .over_history
        .push(summarize(over_number, bowler_id, bowler_name, progress, maiden));

    state.previous_bowler_id = Some(bowler_id);
    state.swap_strike();

    if !innings_over && let Some(next) = next_bowler_id(state) {
        debug!("Bowler {} takes the next over", next);
        state.bowler_id = next;
    }
}

/// Keep an over cut short by the end of the innings in the history.
pub(crate) fn close_partial_over(state: &mut MatchState) {
    if state.over.tokens.is_empty() {
        return;
    }
    let progress = std::mem::take(&mut state.over);
    let over_number = state.innings.balls / state.settings.balls_per_over + 1;
    let bowler_id = state.bowler_id;
    let bowler_name = state
        .bowler()
        .map(|b| b.name.clone())
        .unwrap_or_default();

    debug!("Closing partial over {}", over_number);
    state
        .innings
        .over_history
        .push(summarize(over_number, bowler_id, bowler_name, progress, false));
}

fn summarize(
    over_number: u32,
    bowler_id: u32,
    bowler_name: String,
    progress: OverProgress,
    maiden: bool,
) -> OverSummary {
    OverSummary {
        over_number,
        bowler_id,
        bowler_name,
        balls: progress.tokens,
        runs: progress.runs,
        wickets: progress.wickets,
        maiden,
    }
}

/// Lowest-id bowler who did not bowl the previous over
pub fn next_bowler_id(state: &MatchState) -> Option<u32> {
    state
        .innings
        .bowling
        .iter()
        .map(|b| b.id)
        .find(|&id| Some(id) != state.previous_bowler_id)
}

/// Hand the ball to `bowler_id` for the next over.
pub fn change_bowler(state: &MatchState, bowler_id: u32) -> Result<MatchState> {
    if !state.phase.is_active() {
        return Err(Error::InningsNotActive);
    }
    if !state.over.tokens.is_empty() {
        return Err(Error::OverInProgress {
            deliveries: state.over.tokens.len(),
        });
    }
    if state.innings.bowler(bowler_id).is_none() {
        return Err(Error::UnknownPlayer(bowler_id));
    }
    if state.previous_bowler_id == Some(bowler_id) {
        return Err(Error::ConsecutiveOver(bowler_id));
    }

    let mut next = state.clone();
    next.bowler_id = bowler_id;
    Ok(next)
}
