//! Live scoring engine.
//!
//! Every operation takes the current `MatchState` and returns the next one:
//! - `apply` - ball-by-ball reducer
//! - `change_bowler`, `swap_strike`, `retire` - between-ball operations
//! - `InningsLifecycle` - innings and match end, second innings start
//! - `UndoLedger` - bounded stack of prior states

mod crease;
mod event;
mod lifecycle;
mod over;
mod processor;
mod undo;

pub use crease::{Crease, next_batsman_id, retire, swap_strike};
pub use event::{BallEvent, RunOut};
pub use lifecycle::{InningsLifecycle, Transition};
pub use over::{change_bowler, is_over_complete, next_bowler_id};
pub use processor::apply;
pub use undo::{Snapshot, UndoLedger};
