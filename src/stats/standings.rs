//! Regular season standings from a league's `Standings` sheet.

use serde::Serialize;
use std::collections::BTreeMap;

use super::quality::Diagnostic;
use crate::sheets::{Row, Table};

/// How one team stands this season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeasonRecord {
    pub team: String,
    pub rank: Option<u32>,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
    pub win_pct: Option<f64>,
    pub gb: f64,
    pub win_pct_vs_500: f64,
    pub win_pct_one_run: Option<f64>,
    pub sos: Option<f64>,
    pub sweeps_w: Option<u32>,
    pub splits: Option<u32>,
    pub sweeps_l: Option<u32>,
    pub innings_per_game: Option<f64>,
    pub elo: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ego_starting: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ego_current: Option<i64>,
}

/// Games each team plays in a double round robin of `team_count` teams.
pub fn games_per_team(team_count: usize) -> u32 {
    2 * (team_count as u32).saturating_sub(1)
}

/// Ratings over 1000 are exported with thousands separators.
fn parse_rating(raw: &str) -> Option<i64> {
    raw.replace(',', "").trim().parse::<f64>().ok().map(|v| v.round() as i64)
}

fn rating(row: &Row<'_>, column: &str) -> Option<i64> {
    row.text(column).as_deref().and_then(parse_rating)
}

fn parse_record(row: &Row<'_>) -> Result<TeamSeasonRecord, String> {
    let team = row.text("team_name").ok_or("missing team name")?;
    let wins = row.count("w").ok_or("wins is not a whole number")?;
    let losses = row.count("l").ok_or("losses is not a whole number")?;

    Ok(TeamSeasonRecord {
        team,
        rank: row.count("#"),
        wins,
        losses,
        remaining: 0,
        win_pct: row.number("w%"),
        // "-" for the leader, and for teams without games against .500+ teams
        gb: row.number("gb").unwrap_or(0.0),
        win_pct_vs_500: row.number("vs_500+").unwrap_or(0.0),
        win_pct_one_run: row.number("1run_w%"),
        sos: row.number("sos"),
        sweeps_w: row.count("w_sweeps"),
        splits: row.count("splits"),
        sweeps_l: row.count("l_sweeps"),
        innings_per_game: row.number("inn/gm"),
        elo: rating(row, "elo"),
        ego_starting: rating(row, "starting_ego"),
        ego_current: rating(row, "current_ego"),
    })
}

/// Team records keyed by team name, plus the rows that could not be read.
pub fn build_standings(table: &Table) -> (BTreeMap<String, TeamSeasonRecord>, Vec<Diagnostic>) {
    let mut records = BTreeMap::new();
    let mut rejected = Vec::new();

    for row in table.rows() {
        let parsed = parse_record(&row).and_then(|record| {
            if records.contains_key(&record.team) {
                Err(format!("{} is listed twice", record.team))
            } else {
                Ok(record)
            }
        });
        match parsed {
            Ok(record) => {
                records.insert(record.team.clone(), record);
            }
            Err(reason) => {
                rejected.push(Diagnostic::for_row(table.name(), &row, reason).logged())
            }
        }
    }

    // Dropped teams leave their opponents short of a full schedule.
    let games = games_per_team(records.len());
    for record in records.values_mut() {
        record.remaining = games.saturating_sub(record.wins + record.losses);
    }

    (records, rejected)
}
