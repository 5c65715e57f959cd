//! Time-related types for league seasons and weeks.

use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for season numbers (seasons are counted, not dated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(number: u16) -> Self {
        Self(number)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Object key used in JSON output. Consumers index by these keys from
    /// JavaScript, where purely numeric object keys misbehave.
    pub fn key(&self) -> SeasonKey {
        SeasonKey(*self)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Map key for per-season output, serialized as `season_{n}` and ordered
/// numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeasonKey(pub Season);

impl Serialize for SeasonKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "season_{}", self.0)
    }
}

/// Type-safe wrapper for regular season week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse_and_display() {
        let season: Season = " 18 ".parse().unwrap();
        assert_eq!(season, Season::new(18));
        assert_eq!(season.to_string(), "18");
        assert!("eighteen".parse::<Season>().is_err());
    }

    #[test]
    fn test_season_key_serializes_with_prefix() {
        let json = serde_json::to_string(&Season::new(7).key()).unwrap();
        assert_eq!(json, "\"season_7\"");
    }

    #[test]
    fn test_season_keys_order_numerically() {
        let mut keys = vec![Season::new(10).key(), Season::new(9).key()];
        keys.sort();
        assert_eq!(keys[0].to_string(), "season_9");
    }

    #[test]
    fn test_week_display() {
        assert_eq!(Week::new(4).to_string(), "4");
        assert_eq!(Week::new(4).as_u16(), 4);
    }
}
