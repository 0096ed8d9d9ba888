//! Ball-by-ball reducer: `apply(event, state) -> state'`.
//!
//! Each delivery is applied to a clone of the state in a fixed order:
//! 1. Run, extra and figure deltas, including running-between-wickets
//!    strike rotation
//! 2. Dismissal of the designated batsman
//! 3. Innings/match end check on the updated totals
//! 4. Replacement batsman (unless the innings is over)
//! 5. Over completion (history, maiden, end-of-over rotation, next bowler)
//! 6. Phase transition
//!
//! Any error leaves the input state untouched.

use tracing::debug;

use crate::error::{Error, Result};
use crate::scoring::crease::replace_batsman;
use crate::scoring::lifecycle::InningsLifecycle;
use crate::scoring::over::{self, Delivery};
use crate::scoring::BallEvent;
use crate::state::{Batsman, Bowler, DismissalType, FallOfWicket, MatchState};

/// Apply one delivery.
pub fn apply(event: &BallEvent, state: &MatchState) -> Result<MatchState> {
    if !state.phase.is_active() {
        return Err(Error::InningsNotActive);
    }
    event.validate()?;

    let mut next = state.clone();
    let settings = next.settings;

    // Run-out designations refer to the creases before the batsmen ran
    let run_out_id = match *event {
        BallEvent::Wicket {
            dismissal: Some(DismissalType::RunOut),
            batsman: Some(crease),
            ..
        } => Some(crease.batsman_id(state)),
        _ => event
            .attached_run_out()
            .and_then(|r| r.batsman)
            .map(|crease| crease.batsman_id(state)),
    };

    let mut delivery = Delivery {
        token: event.token(),
        ..Default::default()
    };

    match *event {
        BallEvent::Runs(runs) => {
            legal_ball(&mut next)?;
            off_the_bat(&mut next, runs)?;
            delivery.runs = runs;
            delivery.conceded = runs;
            rotate_on_odd(&mut next, runs);
        }
        BallEvent::Wide { extra_runs, .. } => {
            let total = settings.wide_runs + extra_runs;
            next.innings.runs += total;
            next.innings.extras.wides += total;
            next.innings.extras.total += total;
            current_bowler(&mut next)?.runs_conceded += total;
            delivery.runs = total;
            delivery.conceded = total;
            delivery.illegal = true;
            rotate_on_odd(&mut next, extra_runs);
        }
        BallEvent::NoBall { extra_runs, .. } => {
            let total = settings.no_ball_runs + extra_runs;
            next.innings.runs += settings.no_ball_runs;
            next.innings.extras.no_balls += settings.no_ball_runs;
            next.innings.extras.total += settings.no_ball_runs;
            current_bowler(&mut next)?.runs_conceded += settings.no_ball_runs;
            // Faced, but not part of the over
            current_striker(&mut next)?.balls += 1;
            off_the_bat(&mut next, extra_runs)?;
            delivery.runs = total;
            delivery.conceded = total;
            delivery.illegal = true;
            rotate_on_odd(&mut next, extra_runs);
        }
        BallEvent::Bye { runs, .. } | BallEvent::LegBye { runs, .. } => {
            legal_ball(&mut next)?;
            next.innings.runs += runs;
            let extras = &mut next.innings.extras;
            if matches!(event, BallEvent::Bye { .. }) {
                extras.byes += runs;
            } else {
                extras.leg_byes += runs;
            }
            extras.total += runs;
            delivery.runs = runs;
            rotate_on_odd(&mut next, runs);
        }
        BallEvent::Wicket {
            dismissal: Some(DismissalType::RunOut),
            runs,
            ..
        } => {
            legal_ball(&mut next)?;
            off_the_bat(&mut next, runs)?;
            delivery.runs = runs;
            delivery.conceded = runs;
            rotate_on_odd(&mut next, runs);
        }
        BallEvent::Wicket {
            dismissal: Some(_), ..
        } => legal_ball(&mut next)?,
        BallEvent::Wicket { dismissal: None, .. } => return Err(Error::MissingDismissal),
    }

    let dismissed = match (*event, run_out_id) {
        (_, Some(id)) => Some((id, DismissalType::RunOut)),
        (BallEvent::Wicket { dismissal: Some(how), .. }, None) => Some((next.striker_id, how)),
        _ => None,
    };
    if let Some((id, how)) = dismissed {
        dismiss(&mut next, id, how)?;
        delivery.wickets = 1;
    }

    debug!(
        "{} -> {} ({})",
        event,
        next.innings.score_line(),
        next.innings.overs(settings.balls_per_over)
    );
    over::record(&mut next, delivery);

    let transition = InningsLifecycle::check(&next);
    let innings_over = transition.is_some();

    if let Some((id, _)) = dismissed
        && !innings_over
    {
        replace_batsman(&mut next, id)?;
    }

    if over::is_over_complete(&next, event) {
        over::complete_over(&mut next, innings_over);
    } else if innings_over {
        over::close_partial_over(&mut next);
    }

    if let Some(transition) = transition {
        InningsLifecycle::apply(&mut next, transition);
    }
    Ok(next)
}

fn current_striker(state: &mut MatchState) -> Result<&mut Batsman> {
    let id = state.striker_id;
    state.innings.batsman_mut(id).ok_or(Error::UnknownPlayer(id))
}

fn current_bowler(state: &mut MatchState) -> Result<&mut Bowler> {
    let id = state.bowler_id;
    state.innings.bowler_mut(id).ok_or(Error::UnknownPlayer(id))
}

/// A delivery that counts toward the over: faced by the striker and
/// bowled by the bowler.
fn legal_ball(state: &mut MatchState) -> Result<()> {
    current_striker(state)?.balls += 1;
    current_bowler(state)?.balls += 1;
    state.innings.balls += 1;
    Ok(())
}

/// Runs credited to the striker and charged to the bowler.
fn off_the_bat(state: &mut MatchState, runs: u32) -> Result<()> {
    current_striker(state)?.credit_runs(runs);
    current_bowler(state)?.runs_conceded += runs;
    state.innings.runs += runs;
    Ok(())
}

fn rotate_on_odd(state: &mut MatchState, runs: u32) {
    if runs % 2 == 1 {
        state.swap_strike();
    }
}

fn dismiss(state: &mut MatchState, id: u32, how: DismissalType) -> Result<()> {
    let batsman = state.innings.batsman_mut(id).ok_or(Error::UnknownPlayer(id))?;
    batsman.dismiss(how);
    let batsman_name = batsman.name.clone();
    if how.credits_bowler() {
        current_bowler(state)?.wickets += 1;
    }

    let innings = &mut state.innings;
    innings.wickets += 1;
    let fall = FallOfWicket {
        batsman_id: id,
        batsman_name,
        score: innings.runs,
        wicket: innings.wickets,
        over: innings.overs(state.settings.balls_per_over).to_string(),
    };
    debug!(
        "Wicket {}: {} {} at {} ({})",
        fall.wicket,
        fall.batsman_name,
        how,
        fall.score,
        fall.over
    );
    innings.fall_of_wickets.push(fall);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchSettings;
    use crate::scoring::Crease;
    use crate::state::{InningsPhase, MatchResult, Team, WinMargin};

    fn settings() -> MatchSettings {
        MatchSettings {
            overs: 2,
            balls_per_over: 6,
            players_per_team: 4,
            wide_runs: 1,
            no_ball_runs: 1,
        }
    }

    fn state() -> MatchState {
        MatchState::new(
            settings(),
            &Team::new("Falcons", vec!["Asha".into(), "Ben".into(), "Cal".into(), "Dee".into()]),
            &Team::new("Herons", vec!["Kit".into(), "Lou".into(), "Max".into(), "Ned".into()]),
        )
        .unwrap()
    }

    fn play(state: &MatchState, notation: &[&str]) -> MatchState {
        notation.iter().fold(state.clone(), |s, n| {
            apply(&n.parse().unwrap(), &s).unwrap()
        })
    }

    fn assert_runs_balance(state: &MatchState) {
        let innings = &state.innings;
        assert_eq!(innings.batting_runs() + innings.extras.total, innings.runs);
    }

    #[test]
    fn test_runs_credit_everyone() {
        let next = apply(&BallEvent::Runs(4), &state()).unwrap();
        let striker = next.striker().unwrap();
        assert_eq!(next.runs(), 4);
        assert_eq!(next.balls(), 1);
        assert_eq!(striker.runs, 4);
        assert_eq!(striker.balls, 1);
        assert_eq!(striker.fours, 1);
        let bowler = next.bowler().unwrap();
        assert_eq!(bowler.runs_conceded, 4);
        assert_eq!(bowler.balls, 1);
        assert_eq!(next.over.tokens, vec!["4"]);
    }

    #[test]
    fn test_odd_runs_rotate_strike() {
        let state = state();
        for runs in 0..=6 {
            let next = apply(&BallEvent::Runs(runs), &state).unwrap();
            let rotated = next.striker_id == state.non_striker_id;
            assert_eq!(rotated, runs % 2 == 1, "runs = {}", runs);
        }
    }

    #[test]
    fn test_wide_not_credited() {
        let next = apply(&BallEvent::wide(2), &state()).unwrap();
        assert_eq!(next.runs(), 3);
        assert_eq!(next.balls(), 0);
        assert_eq!(next.innings.extras.wides, 3);
        assert_eq!(next.innings.batting_runs(), 0);
        assert_eq!(next.bowler().unwrap().balls, 0);
        assert_eq!(next.bowler().unwrap().runs_conceded, 3);
        assert_eq!(next.striker().unwrap().balls, 0);
        assert!(next.over.had_illegal);
        assert_runs_balance(&next);
    }

    #[test]
    fn test_wide_uses_setting() {
        let mut settings = settings();
        settings.wide_runs = 2;
        let state = MatchState::new(
            settings,
            &Team::new("Falcons", Vec::new()),
            &Team::new("Herons", Vec::new()),
        )
        .unwrap();
        let next = apply(&BallEvent::wide(0), &state).unwrap();
        assert_eq!(next.runs(), 2);
    }

    #[test]
    fn test_no_ball_credits_striker_runs() {
        let state = state();
        let next = apply(&BallEvent::no_ball(3), &state).unwrap();

        assert_eq!(next.runs(), 4);
        assert_eq!(next.balls(), 0);
        assert_eq!(next.innings.extras.no_balls, 1);
        assert_eq!(next.innings.extras.total, 1);
        assert_eq!(next.innings.batsman(1).unwrap().runs, 3);
        assert_eq!(next.innings.batsman(1).unwrap().balls, 1);
        let bowler = next.bowler().unwrap();
        assert_eq!(bowler.runs_conceded, 4);
        assert_eq!(bowler.balls, 0);
        assert_eq!(next.striker_id, state.non_striker_id);
        assert_runs_balance(&next);
    }

    #[test]
    fn test_no_ball_boundary() {
        let next = apply(&BallEvent::no_ball(6), &state()).unwrap();
        assert_eq!(next.innings.batsman(1).unwrap().sixes, 1);
    }

    #[test]
    fn test_byes_credit_extras_only() {
        let state = state();
        let next = apply(&BallEvent::leg_bye(1), &state).unwrap();

        assert_eq!(next.runs(), 1);
        assert_eq!(next.balls(), 1);
        assert_eq!(next.innings.extras.leg_byes, 1);
        assert_eq!(next.innings.batting_runs(), 0);
        let bowler = next.bowler().unwrap();
        assert_eq!(bowler.runs_conceded, 0);
        assert_eq!(bowler.balls, 1);
        assert_eq!(next.striker_id, state.non_striker_id);
        assert_runs_balance(&next);

        let next = apply(&BallEvent::bye(4), &next).unwrap();
        assert_eq!(next.innings.extras.byes, 4);
        assert_eq!(next.innings.extras.total, 5);
    }

    #[test]
    fn test_bowled_credits_bowler() {
        let next = apply(&BallEvent::wicket(DismissalType::Bowled), &state()).unwrap();

        assert_eq!(next.wickets(), 1);
        assert_eq!(next.balls(), 1);
        let out = next.innings.batsman(1).unwrap();
        assert!(out.is_out);
        assert_eq!(out.out_type, Some(DismissalType::Bowled));
        assert_eq!(out.balls, 1);
        assert_eq!(next.bowler().unwrap().wickets, 1);
        assert_eq!(next.striker_id, 3);
        assert_eq!(next.non_striker_id, 2);

        let fall = &next.innings.fall_of_wickets[0];
        assert_eq!(fall.batsman_name, "Asha");
        assert_eq!(fall.score, 0);
        assert_eq!(fall.wicket, 1);
        assert_eq!(fall.over, "0.1");
    }

    #[test]
    fn test_run_out_with_completed_runs() {
        let state = state();
        let next = apply(&BallEvent::run_out(Crease::NonStriker, 1), &state).unwrap();

        assert_eq!(next.runs(), 1);
        assert_eq!(next.wickets(), 1);
        assert_eq!(next.balls(), 1);
        assert_eq!(next.innings.batsman(1).unwrap().runs, 1);
        let out = next.innings.batsman(2).unwrap();
        assert!(out.is_out);
        assert_eq!(out.out_type, Some(DismissalType::RunOut));
        assert_eq!(next.bowler().unwrap().wickets, 0);
        assert_eq!(next.bowler().unwrap().runs_conceded, 1);
        // Batsmen crossed: Asha is at the far end, the new batsman faces
        assert_eq!(next.non_striker_id, 1);
        assert_eq!(next.striker_id, 3);
        assert_eq!(next.innings.fall_of_wickets[0].score, 1);
    }

    #[test]
    fn test_wide_with_run_out() {
        let state = state();
        let event = BallEvent::wide(2).with_run_out(Crease::NonStriker);
        let next = apply(&event, &state).unwrap();

        assert_eq!(next.runs(), state.runs() + settings().wide_runs + 2);
        assert_eq!(next.wickets(), 1);
        assert_eq!(next.balls(), state.balls());
        let out = next.innings.batsman(2).unwrap();
        assert_eq!(out.out_type, Some(DismissalType::RunOut));
        assert_eq!(next.non_striker_id, 3);
        assert_eq!(next.striker_id, 1);
        assert_eq!(next.bowler().unwrap().wickets, 0);
    }

    #[test]
    fn test_validation_errors_leave_state_untouched() {
        let state = state();
        let missing = BallEvent::Wicket {
            dismissal: None,
            batsman: None,
            runs: 0,
        };
        assert!(matches!(apply(&missing, &state), Err(Error::MissingDismissal)));

        let run_out = BallEvent::Wicket {
            dismissal: Some(DismissalType::RunOut),
            batsman: None,
            runs: 0,
        };
        assert!(matches!(
            apply(&run_out, &state),
            Err(Error::MissingRunOutBatsman)
        ));
        assert!(matches!(
            apply(&BallEvent::Runs(12), &state),
            Err(Error::InvalidRuns { .. })
        ));
    }

    #[test]
    fn test_maiden_over() {
        let next = play(&state(), &["0", "0", "0", "0", "0", "0"]);

        assert_eq!(next.balls(), 6);
        let over = &next.innings.over_history[0];
        assert_eq!(over.runs, 0);
        assert_eq!(over.wickets, 0);
        assert!(over.maiden);
        let kit = next.innings.bowler(1).unwrap();
        assert_eq!(kit.maidens, 1);
        assert_eq!(kit.format_economy(6), "0.00");
        assert_eq!(kit.overs(6).to_string(), "1.0");
        assert_eq!(next.previous_bowler_id, Some(1));
        assert_eq!(next.bowler_id, 2);
    }

    #[test]
    fn test_end_of_over_rotation_is_unconditional() {
        // Single off the last ball: the run swaps, the over end swaps back
        let next = play(&state(), &["0", "0", "0", "0", "0", "1"]);
        assert_eq!(next.striker_id, 1);

        let next = play(&state(), &["0", "0", "0", "0", "0", "2"]);
        assert_eq!(next.striker_id, 2);
    }

    #[test]
    fn test_extras_do_not_complete_over() {
        let next = play(&state(), &["0", "0", "0", "0", "0", "wd", "nb"]);
        assert_eq!(next.balls(), 5);
        assert!(next.innings.over_history.is_empty());
        assert_eq!(next.over.tokens.len(), 7);

        let next = play(&next, &["0"]);
        let over = &next.innings.over_history[0];
        assert_eq!(over.balls.len(), 8);
        assert_eq!(over.runs, 2);
        assert!(!over.maiden);
    }

    #[test]
    fn test_wide_opening_an_over_keeps_it_open() {
        let next = play(&state(), &["0", "0", "0", "0", "0", "0", "wd"]);
        assert_eq!(next.innings.over_history.len(), 1);
        assert_eq!(next.innings.over_history[0].bowler_id, 1);
        assert_eq!(next.over.tokens.len(), 1);
        assert_eq!(next.bowler_id, 2);
        assert_eq!(next.innings.bowler(2).unwrap().runs_conceded, 1);
    }

    #[test]
    fn test_stumped_credits_bowler() {
        let next = play(&state(), &["w:stumped"]);
        assert_eq!(next.bowler().unwrap().wickets, 1);
        assert_eq!(next.innings.fall_of_wickets[0].batsman_id, 1);
    }

    #[test]
    fn test_first_innings_ends_after_overs() {
        let state = play(&state(), &["1"; 12]);
        assert_eq!(state.phase, InningsPhase::FirstInningsEnded);
        assert_eq!(state.runs(), 12);
        assert_eq!(state.innings.over_history.len(), 2);
        assert!(matches!(
            apply(&BallEvent::Runs(1), &state),
            Err(Error::InningsNotActive)
        ));
    }

    #[test]
    fn test_all_out_mid_over() {
        let state = play(&state(), &["4", "w:bowled", "w:caught", "w:lbw"]);

        assert_eq!(state.phase, InningsPhase::FirstInningsEnded);
        assert_eq!(state.wickets(), 3);
        assert_eq!(state.balls(), 4);
        let partial = &state.innings.over_history[0];
        assert_eq!(partial.over_number, 1);
        assert_eq!(partial.wickets, 3);
        assert!(!partial.maiden);
        assert_eq!(state.innings.bowler(1).unwrap().wickets, 3);
    }

    #[test]
    fn test_chase_completes_mid_over() {
        let first = play(&state(), &["6"; 12]);
        let chase = InningsLifecycle::start_second_innings(&first).unwrap();
        assert_eq!(chase.target, 73);

        let chase = play(&chase, &["6"; 12]);
        assert_eq!(chase.phase, InningsPhase::MatchEnded);
        assert_eq!(chase.result, Some(MatchResult::Tie));

        let first = play(&state(), &["1"; 12]);
        let chase = InningsLifecycle::start_second_innings(&first).unwrap();
        let chase = play(&chase, &["6", "6", "1"]);
        assert_eq!(chase.phase, InningsPhase::MatchEnded);
        assert_eq!(
            chase.result,
            Some(MatchResult::Won {
                winner: "Herons".into(),
                margin: WinMargin::Wickets(3),
            })
        );
        assert_eq!(chase.balls(), 3);
        assert!(matches!(
            apply(&BallEvent::Runs(1), &chase),
            Err(Error::InningsNotActive)
        ));
    }
}
