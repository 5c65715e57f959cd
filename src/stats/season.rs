//! One league's season: standings, team stats and game results for the
//! regular season and the playoffs.

use std::collections::BTreeMap;

use tracing::info;

use super::{
    computed::{compute_stat_line, StatLine},
    games::{normalize_games, GameSheet, Sides, TeamGame},
    playoffs::build_playoff_records,
    quality::Diagnostic,
    standings::build_standings,
    tally::{aggregate_by, league_era},
};
use crate::{
    cli::types::{League, Phase, Season},
    output::SeasonStats,
    sheets::Table,
};

/// The three season sheets of one league.
#[derive(Debug, Clone)]
pub struct SeasonTables {
    pub standings: Table,
    pub box_scores: Table,
    pub playoffs: Table,
}

/// Team stat lines for a set of records, with the ERA of those same records.
pub fn team_stats(games: &[TeamGame]) -> BTreeMap<String, StatLine> {
    let era = league_era(games);
    aggregate_by(games, |g| g.team.clone())
        .into_iter()
        .map(|(team, tally)| {
            let line = compute_stat_line(&tally, era).for_team(team.as_str());
            (team, line)
        })
        .collect()
}

/// Build `league`'s stats for `season`, returning the rows left out too.
pub fn build_season_stats(
    league: &League,
    season: Season,
    tables: &SeasonTables,
) -> (SeasonStats, Vec<Diagnostic>) {
    info!("running season {} {}...", season, league);

    let sheet = |phase| GameSheet {
        league,
        phase,
        sides: Sides::Teams,
        season: Some(season),
    };

    let (season_team_records, mut rejected) = build_standings(&tables.standings);
    let regular = normalize_games(&tables.box_scores, &sheet(Phase::Regular));
    let playoffs = normalize_games(&tables.playoffs, &sheet(Phase::Playoffs));
    rejected.extend(regular.rejected);
    rejected.extend(playoffs.rejected);

    let stats = SeasonStats {
        current_season: season,
        season_team_records,
        season_team_stats: team_stats(&regular.team_games),
        season_game_results: regular.results,
        playoffs_team_records: build_playoff_records(&playoffs.team_games),
        // No sheet has these, they come from the playoff box scores alone.
        playoffs_team_stats: team_stats(&playoffs.team_games),
        playoffs_game_results: playoffs.results,
    };

    info!(
        "{} season {}: {} games, {} playoff games, {} rows skipped",
        league,
        season,
        stats.season_game_results.len(),
        stats.playoffs_game_results.len(),
        rejected.len()
    );
    (stats, rejected)
}
