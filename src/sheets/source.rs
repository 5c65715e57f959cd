//! Which sheets the build reads, and where they come from.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{table::Table, types::ValuesEnvelope};
use crate::{
    cli::types::League,
    config::StatsConfig,
    core::{raw_sheet_path, try_read_to_string},
    error::{Result, StatsError},
};

/// Spreadsheet tabs consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Standings,
    BoxScores,
    Playoffs,
    TeamAbbreviations,
    HeadToHead,
    PlayoffsHeadToHead,
}

impl TableKind {
    pub const SEASON: [TableKind; 3] = [
        TableKind::Standings,
        TableKind::BoxScores,
        TableKind::Playoffs,
    ];

    pub const ALL_TIME: [TableKind; 3] = [
        TableKind::TeamAbbreviations,
        TableKind::HeadToHead,
        TableKind::PlayoffsHeadToHead,
    ];
}

/// A tab of a particular league.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetRef {
    pub league: League,
    pub kind: TableKind,
}

/// Head-to-head sheets name their columns differently from box scores.
pub const HEAD_TO_HEAD_RENAMES: [(&str, &str); 4] = [
    ("away_player", "away"),
    ("home_player", "home"),
    ("away_score", "a_score"),
    ("home_score", "h_score"),
];

const GAME_TEXT_COLUMNS: [&str; 7] = [
    "away",
    "home",
    "away_player",
    "home_player",
    "away_team",
    "home_team",
    "round",
];

impl SheetRef {
    pub fn new(league: League, kind: TableKind) -> Self {
        Self { league, kind }
    }

    /// File-name prefix: the league for season tabs, the all-time document otherwise.
    pub fn prefix(&self) -> String {
        match self.kind {
            TableKind::Standings | TableKind::BoxScores | TableKind::Playoffs => {
                self.league.to_string()
            }
            TableKind::TeamAbbreviations | TableKind::HeadToHead => "CAREER_STATS".to_string(),
            TableKind::PlayoffsHeadToHead => "PLAYOFF_STATS".to_string(),
        }
    }

    /// Tab name inside the spreadsheet document.
    pub fn tab(&self) -> String {
        match self.kind {
            TableKind::Standings => "Standings".to_string(),
            TableKind::BoxScores => "Box Scores".to_string(),
            TableKind::Playoffs => "Playoffs".to_string(),
            TableKind::TeamAbbreviations => format!("{} Team Abbreviations", self.league),
            TableKind::HeadToHead | TableKind::PlayoffsHeadToHead => {
                format!("{} Head to Head", self.league)
            }
        }
    }

    /// Spreadsheet document id holding this tab.
    pub fn document_id<'a>(&self, config: &'a StatsConfig) -> Option<&'a str> {
        match self.kind {
            TableKind::Standings | TableKind::BoxScores | TableKind::Playoffs => config
                .leagues
                .iter()
                .find(|l| l.name == self.league)
                .map(|l| l.sheet_id.as_str())
                .filter(|id| !id.is_empty()),
            TableKind::TeamAbbreviations | TableKind::HeadToHead => {
                Some(config.all_time.career_sheet_id.as_str())
            }
            TableKind::PlayoffsHeadToHead => Some(config.all_time.playoffs_sheet_id.as_str()),
        }
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        raw_sheet_path(dir, &self.prefix(), &self.tab())
    }

    /// Bring a loaded table to the column names the stats code reads.
    pub fn prepare(&self, table: Table) -> Table {
        match self.kind {
            TableKind::HeadToHead | TableKind::PlayoffsHeadToHead => {
                table.rename_columns(&HEAD_TO_HEAD_RENAMES)
            }
            TableKind::TeamAbbreviations => {
                table.strip_column_prefix(&self.league.column_prefix())
            }
            TableKind::Standings | TableKind::BoxScores | TableKind::Playoffs => table,
        }
    }

    /// Cleaned column names that hold text rather than numbers.
    pub fn string_columns(&self) -> Vec<String> {
        match self.kind {
            TableKind::Standings => ["team_name", "elo", "starting_ego", "current_ego"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            TableKind::TeamAbbreviations => {
                let prefix = self.league.column_prefix();
                vec![
                    format!("{prefix}teams"),
                    format!("{prefix}abbreviations"),
                    "teams".to_string(),
                    "abbreviations".to_string(),
                    "player".to_string(),
                ]
            }
            TableKind::BoxScores
            | TableKind::Playoffs
            | TableKind::HeadToHead
            | TableKind::PlayoffsHeadToHead => {
                GAME_TEXT_COLUMNS.iter().map(|c| c.to_string()).collect()
            }
        }
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TableKind::PlayoffsHeadToHead => write!(f, "{} Playoffs Head to Head", self.league),
            TableKind::Standings | TableKind::BoxScores | TableKind::Playoffs => {
                write!(f, "{} {}", self.league, self.tab())
            }
            TableKind::TeamAbbreviations | TableKind::HeadToHead => f.write_str(&self.tab()),
        }
    }
}

/// Anything that can hand the pipeline raw cell ranges.
pub trait TableSource {
    /// Raw cell rows of a sheet, header first.
    fn values(&self, sheet: &SheetRef) -> Result<Vec<Vec<Value>>>;

    /// The sheet as a typed table.
    fn load(&self, sheet: &SheetRef) -> Result<Table> {
        let values = self.values(sheet)?;
        let table = Table::from_values(&sheet.to_string(), &values, &sheet.string_columns());
        Ok(sheet.prepare(table))
    }
}

/// Reads the JSON files written by `fetch`.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TableSource for JsonDirSource {
    fn values(&self, sheet: &SheetRef) -> Result<Vec<Vec<Value>>> {
        let path = sheet.path_in(&self.dir);
        let contents = try_read_to_string(&path).ok_or_else(|| StatsError::MissingInput {
            name: sheet.to_string(),
            path: path.clone(),
        })?;
        let envelope: ValuesEnvelope =
            serde_json::from_str(&contents).map_err(|e| StatsError::MalformedInput {
                name: sheet.to_string(),
                message: e.to_string(),
            })?;
        Ok(envelope.values)
    }
}

/// Holds cell ranges in memory, keyed by sheet.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: HashMap<SheetRef, Vec<Vec<Value>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sheet: SheetRef, values: Vec<Vec<Value>>) -> Self {
        self.sheets.insert(sheet, values);
        self
    }

    pub fn insert(&mut self, sheet: SheetRef, values: Vec<Vec<Value>>) {
        self.sheets.insert(sheet, values);
    }
}

impl TableSource for MemorySource {
    fn values(&self, sheet: &SheetRef) -> Result<Vec<Vec<Value>>> {
        self.sheets
            .get(sheet)
            .cloned()
            .ok_or_else(|| StatsError::MissingInput {
                name: sheet.to_string(),
                path: PathBuf::from(format!(
                    "{}__{}.json",
                    sheet.prefix(),
                    crate::core::cache::encode_tab(&sheet.tab())
                )),
            })
    }
}
