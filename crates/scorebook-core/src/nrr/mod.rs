//! Net run rate.
//!
//! - `calculator` - ICC NRR for a single match, with the all-out adjustment
//! - `standings` - points table and cumulative NRR across match records

mod calculator;
mod standings;

pub use calculator::*;
pub use standings::*;
