//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod nrr;
pub mod score;
pub mod show;
pub mod standings;
