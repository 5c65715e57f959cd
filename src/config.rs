//! Pipeline configuration: which leagues exist and where their sheets live.
//!
//! Everything the stats build needs to know about the competition is carried
//! in a [`StatsConfig`] value handed to the pipeline, so several pipelines can
//! be built side by side (tests do this with in-memory tables).

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::{
    cli::types::{League, Season},
    core::try_read_to_string,
    error::{Result, StatsError},
};

/// Environment variable consulted when no API key is passed on the command line.
pub const API_KEY_ENV_VAR: &str = "G_SHEETS_API_KEY";

/// One competition tier and the spreadsheet document holding its season data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeagueConfig {
    pub name: League,
    /// Document id of the league's season spreadsheet.
    #[serde(default)]
    pub sheet_id: String,
}

/// Spreadsheet documents holding the all-time tabs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AllTimeConfig {
    pub career_sheet_id: String,
    pub playoffs_sheet_id: String,
}

impl Default for AllTimeConfig {
    fn default() -> Self {
        Self {
            career_sheet_id: "1wkLJTKO6Tk49if6L4iXJywWezOmseJjKKkCRvAKs7bg".to_string(),
            playoffs_sheet_id: "1HWs44qhq9Buit3FIMfyh9j9G26hpnD7Eptv80FOntzg".to_string(),
        }
    }
}

/// Raw deserialization target for the TOML file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    leagues: Vec<LeagueConfig>,
    #[serde(default)]
    all_time: AllTimeConfig,
}

/// Leagues and sheet documents known to the build.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsConfig {
    pub leagues: Vec<LeagueConfig>,
    pub all_time: AllTimeConfig,
}

impl Default for StatsConfig {
    fn default() -> Self {
        let league = |name: &str, sheet_id: &str| LeagueConfig {
            name: League::new(name),
            sheet_id: sheet_id.to_string(),
        };
        Self {
            leagues: vec![
                league("XBL", "1x5vwIVqk3-vEypu6dQb9Vb3kzVl9i2tA_zTcDK4I9LU"),
                league("AAA", "1Dq7fLYeqsvAbwljnzcyhNQ4s2bDeaZky1pQeSJQdAps"),
                league("AA", "14HmPir8MqsTyQE4BF3nxZVjsJL1MFACto4RDpH9eKqQ"),
            ],
            all_time: AllTimeConfig::default(),
        }
    }
}

impl StatsConfig {
    /// Parse and validate a TOML config string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        let config = Self {
            leagues: file.leagues,
            all_time: file.all_time,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to the built-in leagues when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = try_read_to_string(path).ok_or_else(|| StatsError::MissingInput {
            name: "config".to_string(),
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn league_names(&self) -> Vec<League> {
        self.leagues.iter().map(|l| l.name.clone()).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.leagues.is_empty() {
            return Err(StatsError::Config {
                field: "leagues".to_string(),
                message: "at least one league is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for league in &self.leagues {
            if league.name.as_str().trim().is_empty() {
                return Err(StatsError::Config {
                    field: "leagues.name".to_string(),
                    message: "league names must not be blank".to_string(),
                });
            }
            if !seen.insert(&league.name) {
                return Err(StatsError::Config {
                    field: "leagues.name".to_string(),
                    message: format!("league {} is listed twice", league.name),
                });
            }
        }
        Ok(())
    }
}

/// Everything one `build` invocation runs with.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub stats: StatsConfig,
    pub season: Season,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_three_leagues() {
        let config = StatsConfig::default();
        let names: Vec<String> = config
            .league_names()
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(names, vec!["XBL", "AAA", "AA"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_config() {
        let config = StatsConfig::from_toml_str(
            r#"
            [[leagues]]
            name = "XBL"
            sheet_id = "abc"

            [[leagues]]
            name = "Rookie"

            [all_time]
            career_sheet_id = "career"
            playoffs_sheet_id = "playoffs"
            "#,
        )
        .unwrap();

        assert_eq!(config.leagues.len(), 2);
        assert_eq!(config.leagues[0].sheet_id, "abc");
        assert_eq!(config.leagues[1].name, League::new("Rookie"));
        assert!(config.leagues[1].sheet_id.is_empty());
        assert_eq!(config.all_time.career_sheet_id, "career");
    }

    #[test]
    fn test_all_time_section_defaults() {
        let config = StatsConfig::from_toml_str(
            r#"
            [[leagues]]
            name = "XBL"
            "#,
        )
        .unwrap();
        assert_eq!(config.all_time, AllTimeConfig::default());
    }

    #[test]
    fn test_empty_league_list_rejected() {
        let result = StatsConfig::from_toml_str("leagues = []");
        match result {
            Err(StatsError::Config { field, .. }) => assert_eq!(field, "leagues"),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_league_rejected() {
        let result = StatsConfig::from_toml_str(
            r#"
            [[leagues]]
            name = "AA"
            [[leagues]]
            name = "AA"
            "#,
        );
        assert!(matches!(result, Err(StatsError::Config { .. })));
    }

    #[test]
    fn test_invalid_toml_is_toml_error() {
        let result = StatsConfig::from_toml_str("[[leagues]\nname = ");
        assert!(matches!(result, Err(StatsError::Toml(_))));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(StatsConfig::load(None).unwrap(), StatsConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let result = StatsConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(StatsError::MissingInput { .. })));
    }
}
