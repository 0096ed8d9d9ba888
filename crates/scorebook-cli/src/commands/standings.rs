//! Standings command: points table over every record in the store.

use anyhow::{Context, Result};
use scorebook_core::export::format_standings;
use scorebook_core::nrr::Standings;
use scorebook_core::session::JsonFileStore;
use serde::Serialize;

#[derive(Serialize)]
struct Row<'a> {
    position: usize,
    team: &'a str,
    played: u32,
    won: u32,
    lost: u32,
    tied: u32,
    points: u32,
    nrr: f64,
}

pub fn run(store_dir: &str, json: bool) -> Result<()> {
    let store = JsonFileStore::new(store_dir);
    let records = store
        .records()
        .with_context(|| format!("Failed to read records from {}", store_dir))?;

    if records.is_empty() {
        eprintln!("No match records in {}", store_dir);
        return Ok(());
    }
    let standings = Standings::from_records(&records);

    if json {
        let rows: Vec<Row> = standings
            .table()
            .into_iter()
            .enumerate()
            .map(|(index, row)| Row {
                position: index + 1,
                team: &row.team,
                played: row.played,
                won: row.won,
                lost: row.lost,
                tied: row.tied,
                points: row.points,
                nrr: row.nrr(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        eprintln!("{} matches", records.len());
        println!("{}", format_standings(&standings));
    }
    Ok(())
}
