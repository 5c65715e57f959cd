//! Career stats folded across every league and season.
//!
//! Every head-to-head record updates several tallies in one pass: the
//! player's per-league and per-season tallies, the tally for the pair of
//! players, and the runs and innings used for the ERA of the game's
//! league-season. Stat lines are then computed with the ERA of the matching
//! scope: all-time for all-time lines and head-to-head, the league's for
//! by-league lines, the league-season's for by-season lines.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::{
    computed::{compute_stat_line, StatLine},
    games::TeamGame,
    players::Roster,
    safe_num::SafeNum,
    tally::{EraTotals, RawTally},
};
use crate::{
    cli::types::{League, Phase, Season, SeasonKey},
    error::Result,
};


/// Regular season stat line with sweep counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerSeasonStats {
    #[serde(flatten)]
    pub stats: StatLine,
    pub sweeps_w: u32,
    pub splits: u32,
    pub sweeps_l: u32,
}

/// Playoff stat line with appearance and series counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerPlayoffsStats {
    #[serde(flatten)]
    pub stats: StatLine,
    pub appearances: u32,
    pub series_wins: u32,
    pub series_losses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerSeasonPerformance {
    pub player: String,
    pub all_time: CareerSeasonStats,
    pub by_league: BTreeMap<League, CareerSeasonStats>,
    pub by_season: BTreeMap<SeasonKey, CareerSeasonStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerPlayoffsPerformance {
    pub player: String,
    pub all_time: CareerPlayoffsStats,
    pub by_league: BTreeMap<League, CareerPlayoffsStats>,
}

/// Two players' stats in games against each other. `player_a` sorts first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub player_a: String,
    pub player_z: String,
    pub player_a_stats: StatLine,
    pub player_z_stats: StatLine,
}

/// Lookups read `[player_a][player_z]`.
pub type HeadToHeadTable = BTreeMap<String, BTreeMap<String, HeadToHead>>;

/// Series finished per player: sweeps in the regular season, won or lost
/// series in the playoffs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesCounts {
    pub won: u32,
    pub lost: u32,
    pub split: u32,
}

impl SeriesCounts {
    fn merge(&mut self, other: &SeriesCounts) {
        self.won += other.won;
        self.lost += other.lost;
        self.split += other.split;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeriesOutcome {
    Won,
    Lost,
    Split,
}

/// Outcome for the player with `wins` against an opponent with `losses` wins.
fn series_outcome(phase: Phase, wins: u32, losses: u32) -> Option<SeriesOutcome> {
    match phase {
        // The better record takes a playoff series; an unfinished even series counts for nobody.
        Phase::Playoffs if wins > losses => Some(SeriesOutcome::Won),
        Phase::Playoffs if wins < losses => Some(SeriesOutcome::Lost),
        Phase::Playoffs => None,
        Phase::Regular if wins + losses < 2 => None,
        Phase::Regular if losses == 0 => Some(SeriesOutcome::Won),
        Phase::Regular if wins == 0 => Some(SeriesOutcome::Lost),
        Phase::Regular if wins == losses => Some(SeriesOutcome::Split),
        Phase::Regular => None,
    }
}

/// Games between one pair of players in one week or playoff round.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct SeriesKey {
    league: League,
    season: Season,
    stage: String,
    player_a: String,
    player_z: String,
}

#[derive(Debug, Clone, Default)]
struct SeasonTally {
    league: Option<League>,
    team: Option<String>,
    tally: RawTally,
}

#[derive(Debug, Clone, Default)]
struct PlayerTallies {
    by_league: BTreeMap<League, RawTally>,
    by_season: BTreeMap<Season, SeasonTally>,
}

/// Accumulates every career tally for one phase.
#[derive(Debug, Clone)]
pub struct CareerFold {
    phase: Phase,
    players: BTreeMap<String, PlayerTallies>,
    head_to_head: BTreeMap<(String, String), [RawTally; 2]>,
    series: BTreeMap<SeriesKey, [u32; 2]>,
    era: BTreeMap<(League, Season), EraTotals>,
}

impl CareerFold {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            players: BTreeMap::new(),
            head_to_head: BTreeMap::new(),
            series: BTreeMap::new(),
            era: BTreeMap::new(),
        }
    }

    /// Fold every record. Stops at the first player without a team.
    pub fn fold<'a>(
        phase: Phase,
        games: impl IntoIterator<Item = &'a TeamGame>,
        roster: &Roster,
    ) -> Result<Self> {
        let mut fold = Self::new(phase);
        for game in games {
            fold.record(game, roster)?;
        }
        Ok(fold)
    }

    /// Fold one head-to-head record. Its player must have a team in the
    /// roster for the game's league and season.
    pub fn record(&mut self, game: &TeamGame, roster: &Roster) -> Result<()> {
        let player = game.name();
        let opponent = game.opponent_player.as_deref().unwrap_or_default();
        let team = roster.resolve(player, &game.league, game.season)?;

        let tallies = self.players.entry(player.to_string()).or_default();
        tallies
            .by_league
            .entry(game.league.clone())
            .or_default()
            .record(game);
        let season = tallies.by_season.entry(game.season).or_default();
        season.league.get_or_insert_with(|| game.league.clone());
        season.team.get_or_insert_with(|| team.team_name.clone());
        season.tally.record(game);

        let is_a = player < opponent;
        let (player_a, player_z) = if is_a {
            (player, opponent)
        } else {
            (opponent, player)
        };
        let pair = self
            .head_to_head
            .entry((player_a.to_string(), player_z.to_string()))
            .or_default();
        pair[usize::from(!is_a)].record(game);

        // Count each game once, from player_a's side.
        if is_a {
            let stage = match (&game.round, game.week) {
                (Some(round), _) => round.clone(),
                (None, Some(week)) => week.to_string(),
                (None, None) => String::new(),
            };
            let series = self
                .series
                .entry(SeriesKey {
                    league: game.league.clone(),
                    season: game.season,
                    stage,
                    player_a: player_a.to_string(),
                    player_z: player_z.to_string(),
                })
                .or_default();
            series[0] += u32::from(game.win);
            series[1] += u32::from(game.loss);
        }

        self.era
            .entry((game.league.clone(), game.season))
            .or_default()
            .record(game);
        Ok(())
    }

    /// ERA over every league and season.
    pub fn all_time_era(&self) -> SafeNum {
        let mut totals = EraTotals::default();
        for t in self.era.values() {
            totals.merge(t);
        }
        totals.era()
    }

    pub fn league_era(&self, league: &League) -> SafeNum {
        let mut totals = EraTotals::default();
        for (_, t) in self.era.iter().filter(|((l, _), _)| l == league) {
            totals.merge(t);
        }
        totals.era()
    }

    pub fn season_era(&self, league: &League, season: Season) -> SafeNum {
        self.era
            .get(&(league.clone(), season))
            .map_or(SafeNum::NULL, EraTotals::era)
    }

    /// Finished series per player, keyed by (league, season).
    fn series_by_player(&self) -> BTreeMap<String, BTreeMap<(League, Season), SeriesCounts>> {
        let mut out: BTreeMap<String, BTreeMap<(League, Season), SeriesCounts>> = BTreeMap::new();
        let mut add = |player: &str, key: &SeriesKey, outcome: SeriesOutcome| {
            let counts = out
                .entry(player.to_string())
                .or_default()
                .entry((key.league.clone(), key.season))
                .or_default();
            match outcome {
                SeriesOutcome::Won => counts.won += 1,
                SeriesOutcome::Lost => counts.lost += 1,
                SeriesOutcome::Split => counts.split += 1,
            }
        };

        for (key, [a_wins, z_wins]) in &self.series {
            if let Some(outcome) = series_outcome(self.phase, *a_wins, *z_wins) {
                add(&key.player_a, key, outcome);
            }
            if let Some(outcome) = series_outcome(self.phase, *z_wins, *a_wins) {
                add(&key.player_z, key, outcome);
            }
        }
        out
    }

    fn line(&self, player: &str, tally: &RawTally, era: SafeNum) -> StatLine {
        compute_stat_line(tally, era).for_player(player)
    }

    /// Regular season performance per player.
    pub fn regular_season(&self) -> BTreeMap<String, CareerSeasonPerformance> {
        let series = self.series_by_player();
        let all_time_era = self.all_time_era();

        let with_sweeps = |stats: StatLine, counts: SeriesCounts| CareerSeasonStats {
            stats,
            sweeps_w: counts.won,
            splits: counts.split,
            sweeps_l: counts.lost,
        };

        self.players
            .iter()
            .map(|(player, tallies)| {
                let no_series = BTreeMap::new();
                let player_series = series.get(player).unwrap_or(&no_series);
                let counts_where = |keep: &dyn Fn(&League, Season) -> bool| {
                    let mut counts = SeriesCounts::default();
                    for ((league, season), c) in player_series {
                        if keep(league, *season) {
                            counts.merge(c);
                        }
                    }
                    counts
                };

                let mut all_time = RawTally::new();
                let mut by_league = BTreeMap::new();
                for (league, tally) in &tallies.by_league {
                    all_time.merge(tally);
                    let line = self.line(player, tally, self.league_era(league));
                    let counts = counts_where(&|l, _| l == league);
                    by_league.insert(league.clone(), with_sweeps(line, counts));
                }

                let mut by_season = BTreeMap::new();
                for (season, entry) in &tallies.by_season {
                    let era = entry
                        .league
                        .as_ref()
                        .map_or(SafeNum::NULL, |l| self.season_era(l, *season));
                    let mut line = self.line(player, &entry.tally, era);
                    line.team = entry.team.clone();
                    let counts = counts_where(&|_, s| s == *season);
                    by_season.insert(season.key(), with_sweeps(line, counts));
                }

                let performance = CareerSeasonPerformance {
                    player: player.clone(),
                    all_time: with_sweeps(
                        self.line(player, &all_time, all_time_era),
                        counts_where(&|_, _| true),
                    ),
                    by_league,
                    by_season,
                };
                (player.clone(), performance)
            })
            .collect()
    }

    /// Playoff performance per player.
    pub fn playoffs(&self) -> BTreeMap<String, CareerPlayoffsPerformance> {
        let series = self.series_by_player();
        let all_time_era = self.all_time_era();

        self.players
            .iter()
            .map(|(player, tallies)| {
                let no_series = BTreeMap::new();
                let player_series = series.get(player).unwrap_or(&no_series);
                let appearances: BTreeSet<(&League, Season)> = tallies
                    .by_season
                    .iter()
                    .filter_map(|(season, entry)| entry.league.as_ref().map(|l| (l, *season)))
                    .collect();
                let stats_where = |stats: StatLine, keep: &dyn Fn(&League) -> bool| {
                    let mut counts = SeriesCounts::default();
                    for ((league, _), c) in player_series {
                        if keep(league) {
                            counts.merge(c);
                        }
                    }
                    CareerPlayoffsStats {
                        stats,
                        appearances: appearances.iter().filter(|(l, _)| keep(l)).count() as u32,
                        series_wins: counts.won,
                        series_losses: counts.lost,
                    }
                };

                let mut all_time = RawTally::new();
                let mut by_league = BTreeMap::new();
                for (league, tally) in &tallies.by_league {
                    all_time.merge(tally);
                    let line = self.line(player, tally, self.league_era(league));
                    by_league.insert(league.clone(), stats_where(line, &|l| l == league));
                }

                let performance = CareerPlayoffsPerformance {
                    player: player.clone(),
                    all_time: stats_where(self.line(player, &all_time, all_time_era), &|_| true),
                    by_league,
                };
                (player.clone(), performance)
            })
            .collect()
    }

    /// Stats for every pair of players who met, using the all-time ERA.
    pub fn head_to_head(&self) -> HeadToHeadTable {
        let era = self.all_time_era();
        let mut table: HeadToHeadTable = BTreeMap::new();
        for ((player_a, player_z), [a, z]) in &self.head_to_head {
            table.entry(player_a.clone()).or_default().insert(
                player_z.clone(),
                HeadToHead {
                    player_a: player_a.clone(),
                    player_z: player_z.clone(),
                    player_a_stats: self.line(player_a, a, era),
                    player_z_stats: self.line(player_z, z, era),
                },
            );
        }
        table
    }
}
