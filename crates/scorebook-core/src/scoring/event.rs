//! Scoring events and their compact notation.
//!
//! | Notation       | Event                                      |
//! |----------------|--------------------------------------------|
//! | `0`..`10`      | runs off the bat                           |
//! | `wd`, `wd+2`   | wide, with runs taken                      |
//! | `nb`, `nb+4`   | no-ball, with runs off the bat             |
//! | `b2`, `lb1`    | byes, leg-byes                             |
//! | `w:caught`     | wicket (`bowled`, `lbw`, `stumped`, ...)   |
//! | `w:runout:ns+1`| run out at the non-striker's end, 1 run    |
//!
//! Wides, no-balls, byes and leg-byes take an attached run-out as a second
//! word: `wd+1 ro:s`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::limits;
use crate::error::{Error, Result};
use crate::scoring::Crease;
use crate::state::DismissalType;

/// A run-out attached to an extra. `batsman` is `None` until the scorer
/// designates who was run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOut {
    pub batsman: Option<Crease>,
}

impl RunOut {
    pub fn of(crease: Crease) -> Self {
        Self {
            batsman: Some(crease),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallEvent {
    Runs(u32),
    Wide {
        extra_runs: u32,
        run_out: Option<RunOut>,
    },
    NoBall {
        extra_runs: u32,
        run_out: Option<RunOut>,
    },
    Bye {
        runs: u32,
        run_out: Option<RunOut>,
    },
    LegBye {
        runs: u32,
        run_out: Option<RunOut>,
    },
    Wicket {
        dismissal: Option<DismissalType>,
        /// Designated batsman, run outs only
        batsman: Option<Crease>,
        /// Runs completed before a run out
        runs: u32,
    },
}

impl BallEvent {
    pub fn wide(extra_runs: u32) -> Self {
        Self::Wide {
            extra_runs,
            run_out: None,
        }
    }

    pub fn no_ball(extra_runs: u32) -> Self {
        Self::NoBall {
            extra_runs,
            run_out: None,
        }
    }

    pub fn bye(runs: u32) -> Self {
        Self::Bye {
            runs,
            run_out: None,
        }
    }

    pub fn leg_bye(runs: u32) -> Self {
        Self::LegBye {
            runs,
            run_out: None,
        }
    }

    pub fn wicket(dismissal: DismissalType) -> Self {
        Self::Wicket {
            dismissal: Some(dismissal),
            batsman: None,
            runs: 0,
        }
    }

    pub fn run_out(batsman: Crease, runs: u32) -> Self {
        Self::Wicket {
            dismissal: Some(DismissalType::RunOut),
            batsman: Some(batsman),
            runs,
        }
    }

    /// Attach a run-out to an extra. Other events are returned unchanged.
    pub fn with_run_out(self, batsman: Crease) -> Self {
        self.attach(RunOut::of(batsman))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Runs(_) => "runs",
            Self::Wide { .. } => "wide",
            Self::NoBall { .. } => "no-ball",
            Self::Bye { .. } => "bye",
            Self::LegBye { .. } => "leg-bye",
            Self::Wicket { .. } => "wicket",
        }
    }

    /// Whether the delivery counts toward the over
    pub fn is_credited(&self) -> bool {
        !matches!(self, Self::Wide { .. } | Self::NoBall { .. })
    }

    pub(crate) fn attached_run_out(&self) -> Option<RunOut> {
        match self {
            Self::Wide { run_out, .. }
            | Self::NoBall { run_out, .. }
            | Self::Bye { run_out, .. }
            | Self::LegBye { run_out, .. } => *run_out,
            _ => None,
        }
    }

    /// Reject events a scorer could not have confirmed.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind();
        let check = |runs: u32, min: u32, max: u32| {
            if (min..=max).contains(&runs) {
                Ok(())
            } else {
                Err(Error::InvalidRuns { kind, runs })
            }
        };

        match *self {
            Self::Runs(runs) => check(runs, 0, limits::MAX_RUNS_PER_BALL)?,
            Self::Wide { extra_runs, .. } | Self::NoBall { extra_runs, .. } => {
                check(extra_runs, 0, limits::MAX_EXTRA_RUNS)?
            }
            Self::Bye { runs, .. } | Self::LegBye { runs, .. } => {
                check(runs, limits::MIN_BYE_RUNS, limits::MAX_BYE_RUNS)?
            }
            Self::Wicket {
                dismissal,
                batsman,
                runs,
            } => match dismissal {
                None => return Err(Error::MissingDismissal),
                Some(DismissalType::RunOut) => {
                    if batsman.is_none() {
                        return Err(Error::MissingRunOutBatsman);
                    }
                    check(runs, 0, limits::MAX_RUNS_PER_BALL)?;
                }
                Some(other) if runs > 0 => return Err(Error::RunsOnDismissal(other.as_str())),
                Some(_) => {}
            },
        }

        if let Some(run_out) = self.attached_run_out()
            && run_out.batsman.is_none()
        {
            return Err(Error::MissingRunOutBatsman);
        }
        Ok(())
    }

    /// Over-history token, e.g. `4`, `Wd+2`, `1LB`, `W`
    pub fn token(&self) -> String {
        let base = match *self {
            Self::Runs(runs) => runs.to_string(),
            Self::Wide { extra_runs: 0, .. } => "Wd".to_string(),
            Self::Wide { extra_runs, .. } => format!("Wd+{}", extra_runs),
            Self::NoBall { extra_runs: 0, .. } => "Nb".to_string(),
            Self::NoBall { extra_runs, .. } => format!("Nb+{}", extra_runs),
            Self::Bye { runs, .. } => format!("{}B", runs),
            Self::LegBye { runs, .. } => format!("{}LB", runs),
            Self::Wicket {
                dismissal: Some(DismissalType::RunOut),
                runs: 0,
                ..
            } => "RO".to_string(),
            Self::Wicket {
                dismissal: Some(DismissalType::RunOut),
                runs,
                ..
            } => format!("{}+RO", runs),
            Self::Wicket { .. } => "W".to_string(),
        };

        if self.attached_run_out().is_some() {
            format!("{}+RO", base)
        } else {
            base
        }
    }
}

impl std::fmt::Display for BallEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Runs(runs) => write!(f, "{}", runs)?,
            Self::Wide { extra_runs: 0, .. } => write!(f, "wd")?,
            Self::Wide { extra_runs, .. } => write!(f, "wd+{}", extra_runs)?,
            Self::NoBall { extra_runs: 0, .. } => write!(f, "nb")?,
            Self::NoBall { extra_runs, .. } => write!(f, "nb+{}", extra_runs)?,
            Self::Bye { runs, .. } => write!(f, "b{}", runs)?,
            Self::LegBye { runs, .. } => write!(f, "lb{}", runs)?,
            Self::Wicket {
                dismissal,
                batsman,
                runs,
            } => {
                write!(f, "w")?;
                if let Some(dismissal) = dismissal {
                    let name = dismissal.as_str().replace(' ', "").to_ascii_lowercase();
                    write!(f, ":{}", name)?;
                }
                if let Some(batsman) = batsman {
                    write!(f, ":{}", batsman.short_name())?;
                }
                if runs > 0 {
                    write!(f, "+{}", runs)?;
                }
            }
        }

        if let Some(run_out) = self.attached_run_out() {
            write!(f, " ro")?;
            if let Some(batsman) = run_out.batsman {
                write!(f, ":{}", batsman.short_name())?;
            }
        }
        Ok(())
    }
}

fn parse_count(text: &str, notation: &str) -> Result<u32> {
    text.parse()
        .map_err(|_| Error::InvalidNotation(notation.to_string()))
}

/// `+N` suffix, or 0 when absent
fn parse_plus(rest: &str, notation: &str) -> Result<u32> {
    match rest {
        "" => Ok(0),
        _ => match rest.strip_prefix('+') {
            Some(n) => parse_count(n, notation),
            None => Err(Error::InvalidNotation(notation.to_string())),
        },
    }
}

fn parse_wicket(spec: &str, notation: &str) -> Result<BallEvent> {
    let invalid = || Error::InvalidNotation(notation.to_string());

    // w, w:caught, w:runout, w:runout:ns, w:runout:s+2
    let (spec, runs) = match spec.split_once('+') {
        Some((spec, runs)) => (spec, parse_count(runs, notation)?),
        None => (spec, 0),
    };
    let mut parts = spec.split(':');
    if parts.next() != Some("w") {
        return Err(invalid());
    }
    let dismissal = parts
        .next()
        .map(|name| DismissalType::from_str(name).map_err(|_| invalid()))
        .transpose()?;
    let batsman = parts.next().map(Crease::from_str).transpose()?;
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(BallEvent::Wicket {
        dismissal,
        batsman,
        runs,
    })
}

impl FromStr for BallEvent {
    type Err = Error;

    fn from_str(notation: &str) -> Result<Self> {
        let lowered = notation.trim().to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let main = words
            .next()
            .ok_or_else(|| Error::InvalidNotation(notation.to_string()))?;

        let event = if main.chars().all(|c| c.is_ascii_digit()) {
            BallEvent::Runs(parse_count(main, notation)?)
        } else if let Some(rest) = main.strip_prefix("wd") {
            BallEvent::wide(parse_plus(rest, notation)?)
        } else if let Some(rest) = main.strip_prefix("nb") {
            BallEvent::no_ball(parse_plus(rest, notation)?)
        } else if let Some(rest) = main.strip_prefix("lb") {
            BallEvent::leg_bye(parse_count(rest, notation)?)
        } else if let Some(rest) = main.strip_prefix('b') {
            BallEvent::bye(parse_count(rest, notation)?)
        } else if main == "w" || main.starts_with("w:") || main.starts_with("w+") {
            parse_wicket(main, notation)?
        } else {
            return Err(Error::InvalidNotation(notation.to_string()));
        };

        let event = match words.next() {
            None => event,
            Some(word) if event.is_extra() => {
                let run_out = match word {
                    "ro" => RunOut { batsman: None },
                    _ => match word.strip_prefix("ro:") {
                        Some(crease) => RunOut::of(Crease::from_str(crease)?),
                        None => return Err(Error::InvalidNotation(notation.to_string())),
                    },
                };
                event.attach(run_out)
            }
            Some(_) => return Err(Error::InvalidNotation(notation.to_string())),
        };

        if words.next().is_some() {
            return Err(Error::InvalidNotation(notation.to_string()));
        }
        Ok(event)
    }
}

impl BallEvent {
    fn is_extra(&self) -> bool {
        matches!(
            self,
            Self::Wide { .. } | Self::NoBall { .. } | Self::Bye { .. } | Self::LegBye { .. }
        )
    }

    fn attach(self, run_out: RunOut) -> Self {
        let attached = Some(run_out);
        match self {
            Self::Wide { extra_runs, .. } => Self::Wide {
                extra_runs,
                run_out: attached,
            },
            Self::NoBall { extra_runs, .. } => Self::NoBall {
                extra_runs,
                run_out: attached,
            },
            Self::Bye { runs, .. } => Self::Bye {
                runs,
                run_out: attached,
            },
            Self::LegBye { runs, .. } => Self::LegBye {
                runs,
                run_out: attached,
            },
            other => other,
        }
    }
}
