//! Match state types.
//!
//! This module contains the plain data that scoring operates on:
//! - `MatchState` - the live aggregate, replaced wholesale by each operation
//! - `Innings`, `Extras`, `FallOfWicket`, `OverSummary` - per-innings records
//! - `Batsman`, `Bowler`, `DismissalType` - player figures
//! - `Overs` - "O.B" overs notation
//! - `MatchResult` - outcome of a finished match

mod innings;
mod match_state;
mod overs;
mod player;
mod result;
mod team;

pub use innings::*;
pub use match_state::*;
pub use overs::*;
pub use player::*;
pub use result::*;
pub use team::*;
