//! Running sums over canonical team-game records.

use std::collections::{BTreeMap, BTreeSet};

use super::{games::TeamGame, safe_num::SafeNum};
use crate::cli::types::Season;

/// Add a possibly missing count to a possibly empty sum. Missing values are
/// skipped; a sum that never saw a value stays `None`. Sums saturate.
fn add_count(sum: Option<u32>, value: Option<u32>) -> Option<u32> {
    match (sum, value) {
        (Some(s), Some(v)) => Some(s.saturating_add(v)),
        (s, None) => s,
        (None, v) => v,
    }
}

/// Everything a team or player did over some set of games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTally {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub wins_by_run_rule: u32,
    pub losses_by_run_rule: u32,
    /// Runs scored, from the final score.
    pub r: u32,
    /// Runs allowed, from the final score.
    pub oppr: u32,
    pub ab: Option<u32>,
    pub h: Option<u32>,
    pub hr: Option<u32>,
    pub rbi: Option<u32>,
    pub bb: Option<u32>,
    pub so: Option<u32>,
    pub e: Option<u32>,
    pub oppab: Option<u32>,
    pub opph: Option<u32>,
    pub opphr: Option<u32>,
    pub opprbi: Option<u32>,
    pub oppbb: Option<u32>,
    pub oppso: Option<u32>,
    pub oppe: Option<u32>,
    pub innings_hitting: Option<u32>,
    pub innings_pitching: Option<u32>,
    pub seasons: BTreeSet<Season>,
}

impl RawTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_games<'a>(games: impl IntoIterator<Item = &'a TeamGame>) -> Self {
        let mut tally = Self::new();
        for game in games {
            tally.record(game);
        }
        tally
    }

    /// Fold one game into the sums.
    pub fn record(&mut self, game: &TeamGame) {
        self.games_played = self.games_played.saturating_add(1);
        self.wins = self.wins.saturating_add(u32::from(game.win));
        self.losses = self.losses.saturating_add(u32::from(game.loss));
        self.wins_by_run_rule = self
            .wins_by_run_rule
            .saturating_add(u32::from(game.run_rule_win));
        self.losses_by_run_rule = self
            .losses_by_run_rule
            .saturating_add(u32::from(game.run_rule_loss));
        self.r = self.r.saturating_add(game.runs_scored);
        self.oppr = self.oppr.saturating_add(game.runs_allowed);

        let (own, opp) = (&game.own, &game.opp);
        self.ab = add_count(self.ab, own.ab);
        self.h = add_count(self.h, own.h);
        self.hr = add_count(self.hr, own.hr);
        self.rbi = add_count(self.rbi, own.rbi);
        self.bb = add_count(self.bb, own.bb);
        self.so = add_count(self.so, own.so);
        self.e = add_count(self.e, own.e);
        self.oppab = add_count(self.oppab, opp.ab);
        self.opph = add_count(self.opph, opp.h);
        self.opphr = add_count(self.opphr, opp.hr);
        self.opprbi = add_count(self.opprbi, opp.rbi);
        self.oppbb = add_count(self.oppbb, opp.bb);
        self.oppso = add_count(self.oppso, opp.so);
        self.oppe = add_count(self.oppe, opp.e);
        self.innings_hitting = add_count(self.innings_hitting, game.innings_hitting);
        self.innings_pitching = add_count(self.innings_pitching, game.innings_pitching);

        self.seasons.insert(game.season);
    }

    /// Combine two tallies, e.g. per-league tallies into an all-time one.
    pub fn merge(&mut self, other: &RawTally) {
        self.games_played = self.games_played.saturating_add(other.games_played);
        self.wins = self.wins.saturating_add(other.wins);
        self.losses = self.losses.saturating_add(other.losses);
        self.wins_by_run_rule = self
            .wins_by_run_rule
            .saturating_add(other.wins_by_run_rule);
        self.losses_by_run_rule = self
            .losses_by_run_rule
            .saturating_add(other.losses_by_run_rule);
        self.r = self.r.saturating_add(other.r);
        self.oppr = self.oppr.saturating_add(other.oppr);
        self.ab = add_count(self.ab, other.ab);
        self.h = add_count(self.h, other.h);
        self.hr = add_count(self.hr, other.hr);
        self.rbi = add_count(self.rbi, other.rbi);
        self.bb = add_count(self.bb, other.bb);
        self.so = add_count(self.so, other.so);
        self.e = add_count(self.e, other.e);
        self.oppab = add_count(self.oppab, other.oppab);
        self.opph = add_count(self.opph, other.opph);
        self.opphr = add_count(self.opphr, other.opphr);
        self.opprbi = add_count(self.opprbi, other.opprbi);
        self.oppbb = add_count(self.oppbb, other.oppbb);
        self.oppso = add_count(self.oppso, other.oppso);
        self.oppe = add_count(self.oppe, other.oppe);
        self.innings_hitting = add_count(self.innings_hitting, other.innings_hitting);
        self.innings_pitching = add_count(self.innings_pitching, other.innings_pitching);
        self.seasons.extend(other.seasons.iter().copied());
    }
}

/// Group records by `key` and tally each group. Records mapped to `None` are left out.
pub fn aggregate_by<'a, K, F>(
    games: impl IntoIterator<Item = &'a TeamGame>,
    key: F,
) -> BTreeMap<K, RawTally>
where
    K: Ord,
    F: Fn(&TeamGame) -> Option<K>,
{
    let mut tallies: BTreeMap<K, RawTally> = BTreeMap::new();
    for game in games {
        if let Some(k) = key(game) {
            tallies.entry(k).or_default().record(game);
        }
    }
    tallies
}

/// Runs and innings used to work out a league ERA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EraTotals {
    pub runs: u32,
    pub innings_hitting: u32,
}

impl EraTotals {
    /// Count a record's runs, only if its innings are known.
    pub fn record(&mut self, game: &TeamGame) {
        if let Some(ip) = game.innings_hitting {
            self.runs = self.runs.saturating_add(game.runs_scored);
            self.innings_hitting = self.innings_hitting.saturating_add(ip);
        }
    }

    pub fn merge(&mut self, other: &EraTotals) {
        self.runs = self.runs.saturating_add(other.runs);
        self.innings_hitting = self.innings_hitting.saturating_add(other.innings_hitting);
    }

    /// `9 * runs / innings`, rounded to 3 places. Null without innings.
    pub fn era(&self) -> SafeNum {
        (9.0 * SafeNum::from(self.runs) / SafeNum::from(self.innings_hitting)).round(3)
    }
}

/// League ERA over every record in `games`.
pub fn league_era<'a>(games: impl IntoIterator<Item = &'a TeamGame>) -> SafeNum {
    let mut totals = EraTotals::default();
    for game in games {
        totals.record(game);
    }
    totals.era()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::types::{League, Phase},
        stats::games::{BoxLine, Side},
    };

    fn game(team: &str, scored: u32, allowed: u32, ip: Option<u32>, ab: Option<u32>) -> TeamGame {
        TeamGame {
            league: League::new("XBL"),
            phase: Phase::Regular,
            season: Season::new(3),
            week: None,
            round: None,
            side: Side::Away,
            team: Some(team.to_string()),
            opponent: Some("other".to_string()),
            player: None,
            opponent_player: None,
            runs_scored: scored,
            runs_allowed: allowed,
            innings_hitting: ip,
            innings_pitching: ip,
            win: scored > allowed,
            loss: scored < allowed,
            run_rule_win: false,
            run_rule_loss: false,
            own: BoxLine {
                ab,
                ..BoxLine::default()
            },
            opp: BoxLine::default(),
        }
    }

    #[test]
    fn test_missing_counts_are_skipped() {
        let tally = RawTally::from_games(&[
            game("hippos", 3, 1, Some(9), Some(30)),
            game("hippos", 1, 2, None, None),
        ]);
        assert_eq!(tally.games_played, 2);
        assert_eq!(tally.wins, 1);
        assert_eq!(tally.losses, 1);
        assert_eq!(tally.r, 4);
        assert_eq!(tally.ab, Some(30));
        assert_eq!(tally.innings_hitting, Some(9));
        // never reported by any game
        assert_eq!(tally.h, None);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let games = vec![
            game("hippos", 3, 1, Some(9), Some(30)),
            game("hippos", 1, 2, None, Some(28)),
            game("hippos", 10, 0, Some(5), None),
        ];
        let forward = RawTally::from_games(&games);
        let backward = RawTally::from_games(games.iter().rev());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_merge_matches_single_fold() {
        let games = vec![
            game("hippos", 3, 1, Some(9), Some(30)),
            game("hippos", 1, 2, None, None),
        ];
        let mut merged = RawTally::from_games(&games[..1]);
        merged.merge(&RawTally::from_games(&games[1..]));
        assert_eq!(merged, RawTally::from_games(&games));
    }

    #[test]
    fn test_aggregate_by_team() {
        let games = vec![
            game("hippos", 3, 1, Some(9), Some(30)),
            game("alligators", 1, 3, Some(9), Some(31)),
            game("hippos", 2, 1, Some(9), Some(29)),
        ];
        let tallies = aggregate_by(&games, |g| g.team.clone());
        assert_eq!(tallies.len(), 2);
        assert_eq!(tallies["hippos"].games_played, 2);
        assert_eq!(tallies["hippos"].ab, Some(59));
        assert_eq!(tallies["alligators"].losses, 1);
    }

    #[test]
    fn test_league_era() {
        let games = vec![
            game("hippos", 3, 1, Some(9), None),
            game("alligators", 1, 3, Some(9), None),
            // no innings, ignored
            game("hippos", 7, 1, None, None),
        ];
        // 9 * 4 / 18
        assert_eq!(league_era(&games).value(), Some(2.0));
        assert!(league_era(&games[2..]).is_null());
    }

    #[test]
    fn test_huge_scores_saturate() {
        let games = vec![
            game("hippos", 3_000_000_000, 1, Some(9), Some(3_000_000_000)),
            game("hippos", 3_000_000_000, 2, Some(9), Some(3_000_000_000)),
        ];
        let tally = RawTally::from_games(&games);
        assert_eq!(tally.r, u32::MAX);
        assert_eq!(tally.ab, Some(u32::MAX));
        assert_eq!(tally.games_played, 2);

        let mut merged = tally.clone();
        merged.merge(&tally);
        assert_eq!(merged.r, u32::MAX);
        assert_eq!(merged.oppr, 6);

        let mut totals = EraTotals::default();
        for g in &games {
            totals.record(g);
        }
        assert_eq!(totals.runs, u32::MAX);
        assert!(totals.era().value().is_some());
    }
}
