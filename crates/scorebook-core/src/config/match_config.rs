use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::MatchSettings;
use crate::error::Result;
use crate::state::Team;

/// Match file: settings plus both teams.
///
/// ```toml
/// [settings]
/// overs = 5
///
/// [team_a]
/// name = "Falcons"
/// players = ["Asha", "Ben"]
///
/// [team_b]
/// name = "Herons"
/// ```
///
/// `team_a` bats first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub settings: MatchSettings,
    pub team_a: Team,
    pub team_b: Team,
}

impl MatchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MatchConfig = toml::from_str(content)?;
        config.settings.validate()?;
        Ok(config)
    }
}
