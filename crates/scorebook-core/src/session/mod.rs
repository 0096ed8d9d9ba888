//! Host-facing session layer.
//!
//! - `ScoringSession` - live state with undo, the single entry point for scoring
//! - `MatchRecord` - final record produced once a match has ended
//! - `MatchStore` - persistence port with JSON-file and in-memory stores

mod record;
mod scoring_session;
mod store;

pub use record::*;
pub use scoring_session::*;
pub use store::*;
