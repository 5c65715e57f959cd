//! League and competition phase identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of one competition tier (e.g. `XBL`, `AAA`, `AA`).
///
/// Leagues are configuration, not a closed enum: the set of tiers comes from
/// the config file and is passed into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct League(pub String);

impl League {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Column prefix the league uses in its abbreviation sheet, e.g. `xbl_`.
    pub fn column_prefix(&self) -> String {
        format!("{}_", self.0.to_lowercase())
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Part of the competition a game belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Regular,
    Playoffs,
}

impl Phase {
    pub fn is_playoffs(self) -> bool {
        matches!(self, Phase::Playoffs)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Regular => "regular season",
            Phase::Playoffs => "playoffs",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_column_prefix() {
        assert_eq!(League::new("AAA").column_prefix(), "aaa_");
    }

    #[test]
    fn test_league_serializes_as_plain_string() {
        let json = serde_json::to_string(&League::new("XBL")).unwrap();
        assert_eq!(json, "\"XBL\"");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Regular.to_string(), "regular season");
        assert!(Phase::Playoffs.is_playoffs());
        assert!(!Phase::Regular.is_playoffs());
    }
}
