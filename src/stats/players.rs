//! Who played for which team, in which league, in which season.

use serde::Serialize;
use std::collections::BTreeMap;

use super::quality::Diagnostic;
use crate::{
    cli::types::{League, Season},
    error::{Result, StatsError},
    sheets::{Row, Table},
};

/// A player's team for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSeason {
    pub player: String,
    pub team_name: String,
    pub team_abbrev: String,
    pub league: League,
    pub season: Season,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub player: String,
    /// Ascending by season.
    pub teams: Vec<TeamSeason>,
}

/// Everyone who ever appears in a team abbreviations sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    players: BTreeMap<String, Player>,
}

fn parse_team_season(row: &Row<'_>, league: &League) -> std::result::Result<TeamSeason, String> {
    let season = row
        .count("season")
        .and_then(|s| u16::try_from(s).ok())
        .ok_or("season is not a whole number")?;
    Ok(TeamSeason {
        player: row.text("player").ok_or("missing player")?,
        team_name: row.text("teams").ok_or("missing team name")?,
        team_abbrev: row.text("abbreviations").unwrap_or_default(),
        league: league.clone(),
        season: Season::new(season),
    })
}

impl Roster {
    /// Build from each league's abbreviations sheet. Column prefixes such as
    /// `xbl_` must already be stripped.
    pub fn from_tables<'a>(
        tables: impl IntoIterator<Item = (&'a League, &'a Table)>,
    ) -> (Self, Vec<Diagnostic>) {
        let mut players: BTreeMap<String, Player> = BTreeMap::new();
        let mut rejected = Vec::new();

        for (league, table) in tables {
            for row in table.rows() {
                match parse_team_season(&row, league) {
                    Ok(team) => players
                        .entry(team.player.clone())
                        .or_insert_with(|| Player {
                            player: team.player.clone(),
                            teams: Vec::new(),
                        })
                        .teams
                        .push(team),
                    Err(reason) => {
                        rejected.push(Diagnostic::for_row(table.name(), &row, reason).logged())
                    }
                }
            }
        }

        for player in players.values_mut() {
            player.teams.sort_by_key(|t| t.season);
        }

        (Self { players }, rejected)
    }

    pub fn players(&self) -> &BTreeMap<String, Player> {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Each player's team for `season`, grouped by league. A player listed
    /// more than once for a season counts once, under the last entry loaded.
    pub fn active_players(
        &self,
        leagues: &[League],
        season: Season,
    ) -> BTreeMap<League, Vec<TeamSeason>> {
        let mut active: BTreeMap<League, Vec<TeamSeason>> =
            leagues.iter().map(|l| (l.clone(), Vec::new())).collect();

        for player in self.players.values() {
            if let Some(team) = player.teams.iter().rev().find(|t| t.season == season) {
                active.entry(team.league.clone()).or_default().push(team.clone());
            }
        }
        active
    }

    /// The team `player` played for in `league` during `season`.
    pub fn resolve(&self, player: &str, league: &League, season: Season) -> Result<&TeamSeason> {
        self.players
            .get(player)
            .and_then(|p| {
                p.teams
                    .iter()
                    .find(|t| &t.league == league && t.season == season)
            })
            .ok_or_else(|| StatsError::UnresolvedPlayer {
                player: player.to_string(),
                league: league.to_string(),
                season: season.as_u16(),
            })
    }
}
