use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::state::MatchState;

/// One of the two batting positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum Crease {
    #[strum(serialize = "striker")]
    Striker,
    #[strum(serialize = "non-striker")]
    NonStriker,
}

impl Crease {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Striker => "s",
            Self::NonStriker => "ns",
        }
    }

    /// Id of the batsman currently at this position
    pub fn batsman_id(&self, state: &MatchState) -> u32 {
        match self {
            Self::Striker => state.striker_id,
            Self::NonStriker => state.non_striker_id,
        }
    }
}

impl std::fmt::Display for Crease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

impl FromStr for Crease {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "striker" => Ok(Self::Striker),
            "ns" | "non-striker" | "nonstriker" => Ok(Self::NonStriker),
            _ => Err(Error::InvalidNotation(s.to_string())),
        }
    }
}

/// Next batsman to walk in.
///
/// Lowest batting-order id that is neither out, retired nor at the crease.
/// Failing that, the retired (not out) batsman with the lowest id is
/// recalled.
pub fn next_batsman_id(state: &MatchState) -> Option<u32> {
    let at_crease = |id: u32| id == state.striker_id || id == state.non_striker_id;
    let batting = &state.innings.batting;

    batting
        .iter()
        .filter(|b| !b.is_out && !b.is_retired && !at_crease(b.id))
        .map(|b| b.id)
        .min()
        .or_else(|| {
            batting
                .iter()
                .filter(|b| !b.is_out && b.is_retired && !at_crease(b.id))
                .map(|b| b.id)
                .min()
        })
}

/// Put the next batsman in place of `outgoing`, wherever it stands.
pub(crate) fn replace_batsman(state: &mut MatchState, outgoing: u32) -> Result<()> {
    let crease = if state.striker_id == outgoing {
        Crease::Striker
    } else if state.non_striker_id == outgoing {
        Crease::NonStriker
    } else {
        return Err(Error::UnknownPlayer(outgoing));
    };

    let incoming = next_batsman_id(state).ok_or(Error::NoBatsmanAvailable(crease))?;
    if let Some(batsman) = state.innings.batsman_mut(incoming) {
        batsman.is_retired = false;
        debug!("{} comes in at the {} end", batsman.name, crease);
    }

    match crease {
        Crease::Striker => state.striker_id = incoming,
        Crease::NonStriker => state.non_striker_id = incoming,
    }
    Ok(())
}

/// Manually swap striker and non-striker.
pub fn swap_strike(state: &MatchState) -> Result<MatchState> {
    if !state.phase.is_active() {
        return Err(Error::InningsNotActive);
    }
    let mut next = state.clone();
    next.swap_strike();
    Ok(next)
}

/// Retire the batsman at `crease` (not out, no wicket) and bring in the
/// next batsman.
pub fn retire(state: &MatchState, crease: Crease) -> Result<MatchState> {
    if !state.phase.is_active() {
        return Err(Error::InningsNotActive);
    }
    let mut next = state.clone();
    let outgoing = crease.batsman_id(&next);
    let batsman = next
        .innings
        .batsman_mut(outgoing)
        .ok_or(Error::UnknownPlayer(outgoing))?;
    batsman.is_retired = true;
    debug!("{} retires at {} runs", batsman.name, batsman.runs);

    replace_batsman(&mut next, outgoing)?;
    Ok(next)
}
