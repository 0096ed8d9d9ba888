use thiserror::Error;

use crate::scoring::Crease;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid match settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid team: {0}")]
    InvalidTeam(String),

    #[error("Invalid run value {runs} for {kind}")]
    InvalidRuns { kind: &'static str, runs: u32 },

    #[error("Wicket requires a dismissal type")]
    MissingDismissal,

    #[error("Run out requires the dismissed batsman to be designated")]
    MissingRunOutBatsman,

    #[error("Runs can only be completed on a run out, not {0}")]
    RunsOnDismissal(&'static str),

    #[error("Cannot change bowler during an over ({deliveries} deliveries bowled)")]
    OverInProgress { deliveries: usize },

    #[error("Bowler {0} bowled the previous over")]
    ConsecutiveOver(u32),

    #[error("Unknown player id: {0}")]
    UnknownPlayer(u32),

    #[error("No eligible batsman to replace the {0} batsman")]
    NoBatsmanAvailable(Crease),

    #[error("No innings in progress")]
    InningsNotActive,

    #[error("Match is not finished")]
    MatchNotFinished,

    #[error("Second innings can only start once the first innings has ended")]
    SecondInningsOutOfOrder,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Invalid overs notation: {0}")]
    InvalidOvers(String),

    #[error("Invalid ball notation: {0}")]
    InvalidNotation(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.message().to_string())
    }
}
