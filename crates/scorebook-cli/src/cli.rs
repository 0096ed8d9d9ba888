//! CLI argument definitions for scorebook.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scorebook")]
#[command(about = "Limited-overs cricket scorer", version)]
pub struct Args {
    /// Directory for saved snapshots and match records
    #[arg(long, value_name = "DIR", default_value = "matches", env = "SCOREBOOK_STORE_DIR")]
    pub store_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay a scoring script and print the scorecard
    Score {
        /// Match config (TOML) to start a new match from
        #[arg(long, short, value_name = "FILE", conflicts_with = "resume")]
        config: Option<String>,
        /// Saved live snapshot (JSON) to continue from
        #[arg(long, value_name = "FILE")]
        resume: Option<String>,
        /// Scoring script, one ball or command per line
        #[arg(long, short, value_name = "FILE")]
        script: String,
        /// Output format
        #[arg(long, short, value_enum, default_value = "console")]
        format: OutputFormat,
        /// Save the snapshot (or the record, once finished) to the store
        #[arg(long)]
        save: bool,
        /// Match id used when saving (default: generated from the time)
        #[arg(long)]
        match_id: Option<String>,
    },
    /// Compute net run rate for a completed match
    Nrr {
        /// First innings score, e.g. 150/5
        #[arg(long)]
        first: String,
        /// Overs faced in the first innings, e.g. 20.0
        #[arg(long)]
        first_overs: String,
        /// Second innings score, e.g. 151/3
        #[arg(long)]
        second: String,
        /// Overs faced in the second innings, e.g. 18.2
        #[arg(long)]
        second_overs: String,
        /// Scheduled overs per innings
        #[arg(long, default_value = "20")]
        overs: u32,
        /// Balls per over
        #[arg(long, default_value = "6")]
        balls_per_over: u32,
        /// Players per team
        #[arg(long, default_value = "11")]
        players: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a saved snapshot or match record
    Show {
        /// Snapshot or record file (JSON)
        file: String,
        /// Output as JSON summary
        #[arg(long)]
        json: bool,
    },
    /// Points table from the records in the store
    Standings {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}
