use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinMargin {
    Runs(u32),
    Wickets(u32),
}

impl std::fmt::Display for WinMargin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (n, unit) = match self {
            Self::Runs(n) => (*n, "run"),
            Self::Wickets(n) => (*n, "wicket"),
        };
        let plural = if n == 1 { "" } else { "s" };
        write!(f, "{} {}{}", n, unit, plural)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Won { winner: String, margin: WinMargin },
    Tie,
}

impl MatchResult {
    pub fn winner(&self) -> Option<&str> {
        match self {
            Self::Won { winner, .. } => Some(winner),
            Self::Tie => None,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won { winner, margin } => write!(f, "{} won by {}", winner, margin),
            Self::Tie => write!(f, "Match tied"),
        }
    }
}
