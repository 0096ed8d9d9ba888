use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Overs in cricket notation ("O.B": completed overs, then balls of the
/// over in progress)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Overs {
    pub completed: u32,
    pub balls: u32,
}

impl Overs {
    pub fn from_balls(total_balls: u32, balls_per_over: u32) -> Self {
        Self {
            completed: total_balls / balls_per_over,
            balls: total_balls % balls_per_over,
        }
    }

    /// Parse "18.2", "20" or "20.0".
    ///
    /// The ball component must be below `balls_per_over`.
    pub fn parse(text: &str, balls_per_over: u32) -> Result<Self> {
        let text = text.trim();
        let invalid = || Error::InvalidOvers(text.to_string());

        let (whole, part) = match text.split_once('.') {
            Some((whole, part)) => (whole, Some(part)),
            None => (text, None),
        };
        let completed: u32 = whole.parse().map_err(|_| invalid())?;
        let balls: u32 = match part {
            Some(part) => part.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if balls >= balls_per_over {
            return Err(invalid());
        }

        Ok(Self { completed, balls })
    }

    pub fn total_balls(&self, balls_per_over: u32) -> u32 {
        self.completed * balls_per_over + self.balls
    }

    /// Decimal overs: 18.2 with six-ball overs is 18.333...
    pub fn as_decimal(&self, balls_per_over: u32) -> f64 {
        self.completed as f64 + self.balls as f64 / balls_per_over as f64
    }
}

impl std::fmt::Display for Overs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.completed, self.balls)
    }
}
