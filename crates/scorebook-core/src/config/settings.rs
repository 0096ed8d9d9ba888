use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rules for a single limited-overs match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub overs: u32,
    pub balls_per_over: u32,
    pub players_per_team: u32,
    /// Penalty runs awarded for a wide
    pub wide_runs: u32,
    /// Penalty runs awarded for a no-ball
    pub no_ball_runs: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            overs: 20,
            balls_per_over: 6,
            players_per_team: 11,
            wide_runs: 1,
            no_ball_runs: 1,
        }
    }
}

impl MatchSettings {
    pub fn validate(&self) -> Result<()> {
        if self.overs == 0 {
            return Err(Error::InvalidSettings("overs must be at least 1".into()));
        }
        if self.balls_per_over == 0 {
            return Err(Error::InvalidSettings(
                "balls per over must be at least 1".into(),
            ));
        }
        if self.players_per_team < 2 {
            return Err(Error::InvalidSettings(
                "a team needs at least 2 players".into(),
            ));
        }
        if self.wide_runs == 0 || self.no_ball_runs == 0 {
            return Err(Error::InvalidSettings(
                "wide and no-ball penalties must be at least 1 run".into(),
            ));
        }
        Ok(())
    }

    /// Legal deliveries in a full innings
    pub fn max_balls(&self) -> u32 {
        self.overs * self.balls_per_over
    }

    /// Wickets that end an innings (all out)
    pub fn max_wickets(&self) -> u32 {
        self.players_per_team - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_t20() {
        let settings = MatchSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_balls(), 120);
        assert_eq!(settings.max_wickets(), 10);
    }

    #[test]
    fn test_rejects_zero_overs() {
        let settings = MatchSettings {
            overs: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidSettings(_))));
    }

    #[test]
    fn test_rejects_single_player_team() {
        let settings = MatchSettings {
            players_per_team: 1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_free_wides() {
        let settings = MatchSettings {
            wide_runs: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let settings: MatchSettings = serde_json::from_str(r#"{"overs": 5}"#).unwrap();
        assert_eq!(settings.overs, 5);
        assert_eq!(settings.balls_per_over, 6);
        assert_eq!(settings.players_per_team, 11);
    }
}
