//! The JSON artifacts a build produces, and writing them out.
//!
//! Every artifact is serialized before anything touches the save directory,
//! then all files are written together with
//! [`write_all_or_nothing`](crate::core::write_all_or_nothing).

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{
    cli::types::{League, Season},
    core::write_all_or_nothing,
    error::{Result, StatsError},
    stats::{
        careers::{CareerPlayoffsPerformance, CareerSeasonPerformance, HeadToHeadTable},
        playoffs::PlayoffTeamRecord,
        standings::TeamSeasonRecord,
        GameResult, Player, QualityReport, StatLine, TeamSeason,
    },
};


/// Everything about one league's season. Written to `{league}__s{season}.json`
/// and `{league}.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonStats {
    pub current_season: Season,
    pub season_team_records: BTreeMap<String, TeamSeasonRecord>,
    pub season_team_stats: BTreeMap<String, StatLine>,
    pub season_game_results: Vec<GameResult>,
    pub playoffs_team_records: BTreeMap<String, PlayoffTeamRecord>,
    pub playoffs_team_stats: BTreeMap<String, StatLine>,
    pub playoffs_game_results: Vec<GameResult>,
}

/// All-time stats for every player. Written to `careers.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerStats {
    pub all_players: BTreeMap<String, Player>,
    pub active_players: BTreeMap<League, Vec<TeamSeason>>,
    pub regular_season: BTreeMap<String, CareerSeasonPerformance>,
    pub regular_season_head_to_head: HeadToHeadTable,
    pub playoffs: BTreeMap<String, CareerPlayoffsPerformance>,
    pub playoffs_head_to_head: HeadToHeadTable,
}

pub const CAREERS_FILE: &str = "careers.json";
pub const QUALITY_FILE: &str = "quality.json";

/// Path: {save_dir}/{league}__s{season}.json
pub fn season_stats_path(save_dir: &Path, league: &League, season: Season) -> PathBuf {
    save_dir.join(format!("{}__s{}.json", league, season))
}

/// Path: {save_dir}/{league}.json, the copy for the current season.
pub fn current_season_path(save_dir: &Path, league: &League) -> PathBuf {
    save_dir.join(format!("{}.json", league))
}

/// The result of one build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub season: Season,
    pub seasons: BTreeMap<League, SeasonStats>,
    pub careers: CareerStats,
    pub quality: QualityReport,
}

impl BuildOutput {
    /// Serialize every artifact, paired with its destination.
    pub fn files(&self, save_dir: &Path) -> Result<Vec<(PathBuf, String)>> {
        let mut files = Vec::with_capacity(self.seasons.len() * 2 + 2);
        for (league, stats) in &self.seasons {
            let json = serde_json::to_string(stats)?;
            files.push((season_stats_path(save_dir, league, self.season), json.clone()));
            files.push((current_season_path(save_dir, league), json));
        }
        files.push((save_dir.join(CAREERS_FILE), serde_json::to_string(&self.careers)?));
        files.push((
            save_dir.join(QUALITY_FILE),
            serde_json::to_string_pretty(&self.quality)?,
        ));
        Ok(files)
    }

    /// Write every artifact, or none if any write fails.
    pub fn write(&self, save_dir: &Path) -> Result<Vec<PathBuf>> {
        let files = self.files(save_dir)?;
        write_all_or_nothing(&files)?;
        Ok(files.into_iter().map(|(path, _)| path).collect())
    }

    /// Look up a sub-tree. The first key picks `season` (keyed by league) or
    /// `career`; the rest walk object keys and array indices.
    pub fn query(&self, keys: &[String]) -> Result<Value> {
        let (root, path) = keys.split_first().ok_or(StatsError::InvalidQueryRoot)?;
        let value = match root.as_str() {
            "season" => serde_json::to_value(&self.seasons)?,
            "career" => serde_json::to_value(&self.careers)?,
            _ => return Err(StatsError::InvalidQueryRoot),
        };

        walk(value, path).ok_or_else(|| StatsError::QueryNotFound {
            query: keys.join(", "),
        })
    }
}

fn walk(mut current: Value, path: &[String]) -> Option<Value> {
    for key in path {
        current = match current {
            Value::Object(mut map) => map.remove(key)?,
            Value::Array(mut items) => {
                let index = key.parse::<usize>().ok().filter(|i| *i < items.len())?;
                items.swap_remove(index)
            }
            _ => return None,
        };
    }
    Some(current)
}
