//! Scoring scripts.
//!
//! One entry per line. Blank lines and `#` comments are ignored.
//!
//! ```text
//! 4               # any ball notation: 0-10, wd+1, nb, b2, lb1, w:caught, w:runout:ns+1
//! bowler 3        # hand the ball to bowler 3 for the next over
//! swap            # swap strike
//! retire s        # retire the striker (or ns)
//! rename a 1 Asha # rename player 1 of team A
//! undo
//! next            # start the second innings
//! ```

use anyhow::{Context, Result, bail};
use scorebook_core::scoring::{BallEvent, Crease};
use scorebook_core::state::TeamSide;
use scorebook_core::{Error, ScoringSession};

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Ball(BallEvent),
    Bowler(u32),
    Swap,
    Retire(Crease),
    Rename { side: TeamSide, id: u32, name: String },
    Undo,
    NextInnings,
}

impl ScriptCommand {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = match line.split_once('#') {
            Some((code, _)) => code,
            None => line,
        }
        .trim();
        if line.is_empty() {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or_default().to_ascii_lowercase();
        let command = match head.as_str() {
            "undo" => Self::Undo,
            "swap" => Self::Swap,
            "next" => Self::NextInnings,
            "bowler" => {
                let id = words.next().context("bowler needs a player id")?;
                Self::Bowler(id.parse().with_context(|| format!("bad bowler id: {}", id))?)
            }
            "retire" => {
                let crease = words.next().context("retire needs s or ns")?;
                Self::Retire(crease.parse()?)
            }
            "rename" => {
                let side: TeamSide = words
                    .next()
                    .and_then(|side| side.parse().ok())
                    .context("rename needs a team (a or b)")?;
                let id = words.next().context("rename needs a player id")?;
                let id = id.parse().with_context(|| format!("bad player id: {}", id))?;
                let name = words.by_ref().collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    bail!("rename needs a name");
                }
                Self::Rename { side, id, name }
            }
            _ => Self::Ball(line.parse()?),
        };

        if !matches!(command, Self::Ball(_) | Self::Rename { .. }) && words.next().is_some() {
            bail!("unexpected text after {}", head);
        }
        Ok(Some(command))
    }

    /// Run against the session, returning a short description
    pub fn execute(&self, session: &mut ScoringSession) -> Result<String, Error> {
        match self {
            Self::Ball(event) => {
                session.score(event)?;
                Ok(event.to_string())
            }
            Self::Bowler(id) => {
                let state = session.change_bowler(*id)?;
                let name = state.bowler().map(|b| b.name.clone()).unwrap_or_default();
                Ok(format!("bowler {}", name))
            }
            Self::Swap => {
                session.swap_strike()?;
                Ok("swap strike".to_string())
            }
            Self::Retire(crease) => {
                session.retire(*crease)?;
                Ok(format!("retire {}", crease))
            }
            Self::Rename { side, id, name } => {
                session.rename_player(*side, *id, name)?;
                Ok(format!("rename {}", name))
            }
            Self::Undo => session.undo().map(|label| format!("undo {}", label)),
            Self::NextInnings => {
                session.start_second_innings()?;
                Ok("second innings".to_string())
            }
        }
    }
}

/// Parse a whole script. Errors carry the 1-based line number.
pub fn parse_script(content: &str) -> Result<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let number = index + 1;
        let parsed = ScriptCommand::parse(line)
            .with_context(|| format!("line {}: {}", number, line.trim()))?;
        if let Some(command) = parsed {
            commands.push((number, command));
        }
    }
    Ok(commands)
}
