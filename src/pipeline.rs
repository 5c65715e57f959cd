//! The full build: load every sheet, build each league's season in parallel,
//! then fold careers over all leagues.

use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::{
    cli::types::{League, Phase},
    config::{BuildConfig, StatsConfig},
    error::Result,
    output::{BuildOutput, CareerStats},
    sheets::{SheetRef, Table, TableKind, TableSource},
    stats::{
        build_season_stats, normalize_games, CareerFold, GameSheet, QualityReport, Roster,
        SeasonTables, Sides, TeamGame,
    },
};

/// Every sheet a build reads, loaded up front.
#[derive(Debug, Clone)]
pub struct BuildInputs {
    pub seasons: BTreeMap<League, SeasonTables>,
    pub abbreviations: Vec<(League, Table)>,
    pub head_to_head: Vec<(League, Table)>,
    pub playoffs_head_to_head: Vec<(League, Table)>,
}

/// Every sheet the configured leagues need, season sheets first.
pub fn required_sheets(config: &StatsConfig) -> Vec<SheetRef> {
    let mut sheets = Vec::new();
    for kinds in [TableKind::SEASON, TableKind::ALL_TIME] {
        for league in config.league_names() {
            for kind in kinds {
                sheets.push(SheetRef::new(league.clone(), kind));
            }
        }
    }
    sheets
}

impl BuildInputs {
    /// Load every sheet. The first missing or unreadable one aborts the build
    /// before anything is computed.
    pub fn load<S: TableSource + ?Sized>(source: &S, config: &StatsConfig) -> Result<Self> {
        let mut inputs = Self {
            seasons: BTreeMap::new(),
            abbreviations: Vec::new(),
            head_to_head: Vec::new(),
            playoffs_head_to_head: Vec::new(),
        };

        for league in config.league_names() {
            let load = |kind| {
                let sheet = SheetRef::new(league.clone(), kind);
                debug!("loading {}", sheet);
                source.load(&sheet)
            };
            let tables = SeasonTables {
                standings: load(TableKind::Standings)?,
                box_scores: load(TableKind::BoxScores)?,
                playoffs: load(TableKind::Playoffs)?,
            };
            let abbreviations = load(TableKind::TeamAbbreviations)?;
            let head_to_head = load(TableKind::HeadToHead)?;
            let playoffs_head_to_head = load(TableKind::PlayoffsHeadToHead)?;

            inputs.seasons.insert(league.clone(), tables);
            inputs.abbreviations.push((league.clone(), abbreviations));
            inputs.head_to_head.push((league.clone(), head_to_head));
            inputs
                .playoffs_head_to_head
                .push((league.clone(), playoffs_head_to_head));
        }

        info!("loaded sheets for {} leagues", inputs.seasons.len());
        Ok(inputs)
    }
}

fn career_games(
    tables: &[(League, Table)],
    phase: Phase,
    quality: &mut QualityReport,
) -> Vec<TeamGame> {
    let mut games = Vec::new();
    for (league, table) in tables {
        let normalized = normalize_games(
            table,
            &GameSheet {
                league,
                phase,
                sides: Sides::Players,
                season: None,
            },
        );
        quality.extend(normalized.rejected);
        games.extend(normalized.team_games);
    }
    games
}

/// Fold regular season and playoff careers for every player.
pub fn build_career_stats(
    inputs: &BuildInputs,
    config: &BuildConfig,
    quality: &mut QualityReport,
) -> Result<CareerStats> {
    info!("finding who played which season...");
    let (roster, rejected) = Roster::from_tables(
        inputs
            .abbreviations
            .iter()
            .map(|(league, table)| (league, table)),
    );
    quality.extend(rejected);
    let active_players = roster.active_players(&config.stats.league_names(), config.season);

    info!("tabulating career regular season and head to head stats...");
    let regular = career_games(&inputs.head_to_head, Phase::Regular, quality);
    let regular = CareerFold::fold(Phase::Regular, &regular, &roster)?;

    info!("tabulating career playoffs and head to head stats...");
    let playoffs = career_games(&inputs.playoffs_head_to_head, Phase::Playoffs, quality);
    let playoffs = CareerFold::fold(Phase::Playoffs, &playoffs, &roster)?;

    Ok(CareerStats {
        all_players: roster.players().clone(),
        active_players,
        regular_season: regular.regular_season(),
        regular_season_head_to_head: regular.head_to_head(),
        playoffs: playoffs.playoffs(),
        playoffs_head_to_head: playoffs.head_to_head(),
    })
}

/// Build every artifact from loaded inputs.
pub fn run_build(inputs: &BuildInputs, config: &BuildConfig) -> Result<BuildOutput> {
    let built: Vec<_> = inputs
        .seasons
        .par_iter()
        .map(|(league, tables)| {
            let (stats, rejected) = build_season_stats(league, config.season, tables);
            (league.clone(), stats, rejected)
        })
        .collect();

    let mut quality = QualityReport::new();
    let mut seasons = BTreeMap::new();
    for (league, stats, rejected) in built {
        quality.extend(rejected);
        seasons.insert(league, stats);
    }

    let careers = build_career_stats(inputs, config, &mut quality)?;

    let quality = quality.sorted();
    if !quality.is_empty() {
        info!("{} rows were skipped, see the quality report", quality.len());
    }

    Ok(BuildOutput {
        season: config.season,
        seasons,
        careers,
        quality,
    })
}

/// Load from `source` and build.
pub fn build<S: TableSource + ?Sized>(source: &S, config: &BuildConfig) -> Result<BuildOutput> {
    let inputs = BuildInputs::load(source, &config.stats)?;
    run_build(&inputs, config)
}
