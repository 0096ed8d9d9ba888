use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::error::{Error, Result};

/// Which of the two teams. `A` bats first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn opponent(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Names in batting order
    #[serde(default)]
    pub players: Vec<String>,
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<String>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }

    /// Fill the roster up to `players_per_team` with "Player N" names.
    pub fn padded(&self, players_per_team: u32) -> Result<Self> {
        let size = players_per_team as usize;
        if self.name.trim().is_empty() {
            return Err(Error::InvalidTeam("team name is empty".into()));
        }
        if self.players.len() > size {
            return Err(Error::InvalidTeam(format!(
                "{} has {} players, at most {} allowed",
                self.name,
                self.players.len(),
                size
            )));
        }

        let mut players = self.players.clone();
        for n in players.len() + 1..=size {
            players.push(format!("Player {}", n));
        }

        Ok(Self {
            name: self.name.clone(),
            players,
        })
    }
}
