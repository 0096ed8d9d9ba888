//! Match configuration.
//!
//! This module contains:
//! - `MatchSettings` - per-match rules, frozen once scoring starts
//! - `MatchConfig` - TOML match file with both rosters
//! - Engine limit constants

mod match_config;
mod settings;

pub use match_config::*;
pub use settings::*;

/// Per-ball validation limits.
pub mod limits {
    /// Highest run value accepted for a single delivery off the bat.
    pub const MAX_RUNS_PER_BALL: u32 = 10;

    /// Highest number of runs taken on top of a wide or no-ball penalty.
    pub const MAX_EXTRA_RUNS: u32 = 4;

    /// Byes and leg-byes must be in `MIN_BYE_RUNS..=MAX_BYE_RUNS`.
    pub const MIN_BYE_RUNS: u32 = 1;
    pub const MAX_BYE_RUNS: u32 = 4;
}

/// Undo history configuration.
pub mod undo {
    /// Number of snapshots kept before the oldest is discarded.
    pub const CAPACITY: usize = 50;
}
