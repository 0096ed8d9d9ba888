mod cli;
mod commands;
mod script;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides; warn by default
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scorebook=warn,scorebook_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Score {
            config,
            resume,
            script,
            format,
            save,
            match_id,
        } => commands::score::run(commands::score::ScoreOptions {
            store_dir: &args.store_dir,
            config: config.as_deref(),
            resume: resume.as_deref(),
            script: &script,
            format,
            save,
            match_id: match_id.as_deref(),
        }),
        Command::Nrr {
            first,
            first_overs,
            second,
            second_overs,
            overs,
            balls_per_over,
            players,
            json,
        } => commands::nrr::run(
            (&first, &first_overs),
            (&second, &second_overs),
            overs,
            balls_per_over,
            players,
            json,
        ),
        Command::Show { file, json } => commands::show::run(&file, json),
        Command::Standings { json } => commands::standings::run(&args.store_dir, json),
    }
}
