pub mod config;
pub mod error;
pub mod export;
pub mod nrr;
pub mod scoring;
pub mod session;
pub mod state;

pub use config::{MatchConfig, MatchSettings};
pub use error::{Error, Result};
pub use nrr::{InningsSummary, NrrReport, NrrSettings, Standings, TeamNrr, calculate_nrr};
pub use scoring::{BallEvent, Crease, InningsLifecycle, RunOut, UndoLedger, apply};
pub use session::{JsonFileStore, MatchRecord, MatchStore, MemoryStore, ScoringSession, new_match_id};
pub use state::{
    Batsman, Bowler, DismissalType, Innings, InningsPhase, MatchResult, MatchState, Overs, Team,
    TeamSide, WinMargin,
};
