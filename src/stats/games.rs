//! Per-game normalization.
//!
//! A box-score (or head-to-head) sheet has one row per game with `a_`/`h_`
//! prefixed columns for the away and home sides. [`normalize_games`] checks
//! each row, derives the outcome flags and splits the game into two mirrored
//! [`TeamGame`] records, one from each side's point of view.

use serde::Serialize;

use super::quality::Diagnostic;
use crate::{
    cli::types::{League, Phase, Season, Week},
    sheets::{Row, Table},
};

#[cfg(test)]
mod tests;

/// Games ending at or before this many innings were decided by the run rule.
pub const RUN_RULE_INNINGS: f64 = 8.0;

/// Box-score counts for one side of one game. Any field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoxLine {
    pub ab: Option<u32>,
    pub r: Option<u32>,
    pub h: Option<u32>,
    pub hr: Option<u32>,
    pub rbi: Option<u32>,
    pub bb: Option<u32>,
    pub so: Option<u32>,
    pub e: Option<u32>,
}

impl BoxLine {
    /// Read the side's counts from `{prefix}ab`, `{prefix}h`, ... columns.
    pub fn from_row(row: &Row<'_>, prefix: &str) -> Self {
        let count = |stat: &str| row.count(&format!("{prefix}{stat}"));
        Self {
            ab: count("ab"),
            r: count("r"),
            h: count("h"),
            hr: count("hr"),
            rbi: count("rbi"),
            bb: count("bb"),
            so: count("so"),
            e: count("e"),
        }
    }
}

/// What the away/home columns of a sheet name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sides {
    /// Season sheets: team names.
    Teams,
    /// Head-to-head sheets: player names.
    Players,
}

/// Which side of a game a record is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Away,
    Home,
}

/// One accepted game with its outcome flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    pub league: League,
    pub season: Season,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<Week>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
    pub away: String,
    pub home: String,
    pub away_score: u32,
    pub home_score: u32,
    pub innings: Option<f64>,
    pub winner: String,
    pub away_win: bool,
    pub home_win: bool,
    pub run_rule: bool,
    pub away_stats: BoxLine,
    pub home_stats: BoxLine,
    #[serde(skip)]
    pub phase: Phase,
    #[serde(skip)]
    pub sides: Sides,
}

impl GameResult {
    /// The two canonical records of this game, away first.
    pub fn team_games(&self) -> [TeamGame; 2] {
        [self.team_game(Side::Away), self.team_game(Side::Home)]
    }

    fn team_game(&self, side: Side) -> TeamGame {
        let (name, opponent, own, opp, scored, allowed, win) = match side {
            Side::Away => (
                &self.away,
                &self.home,
                self.away_stats,
                self.home_stats,
                self.away_score,
                self.home_score,
                self.away_win,
            ),
            Side::Home => (
                &self.home,
                &self.away,
                self.home_stats,
                self.away_stats,
                self.home_score,
                self.away_score,
                self.home_win,
            ),
        };

        // The away side bats in the unfinished half inning, if there is one.
        let (innings_hitting, innings_pitching) = match (self.innings, side) {
            (Some(ip), Side::Away) => (Some(ip.ceil() as u32), Some(ip.floor() as u32)),
            (Some(ip), Side::Home) => (Some(ip.floor() as u32), Some(ip.ceil() as u32)),
            (None, _) => (None, None),
        };

        let (team, opponent_team, player, opponent_player) = match self.sides {
            Sides::Teams => (Some(name.clone()), Some(opponent.clone()), None, None),
            Sides::Players => (None, None, Some(name.clone()), Some(opponent.clone())),
        };

        TeamGame {
            league: self.league.clone(),
            phase: self.phase,
            season: self.season,
            week: self.week,
            round: self.round.clone(),
            side,
            team,
            opponent: opponent_team,
            player,
            opponent_player,
            runs_scored: scored,
            runs_allowed: allowed,
            innings_hitting,
            innings_pitching,
            win,
            loss: !win,
            run_rule_win: self.run_rule && win,
            run_rule_loss: self.run_rule && !win,
            own,
            opp,
        }
    }
}

/// One game seen from one side.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGame {
    pub league: League,
    pub phase: Phase,
    pub season: Season,
    pub week: Option<Week>,
    pub round: Option<String>,
    pub side: Side,
    pub team: Option<String>,
    pub opponent: Option<String>,
    pub player: Option<String>,
    pub opponent_player: Option<String>,
    pub runs_scored: u32,
    pub runs_allowed: u32,
    pub innings_hitting: Option<u32>,
    pub innings_pitching: Option<u32>,
    pub win: bool,
    pub loss: bool,
    pub run_rule_win: bool,
    pub run_rule_loss: bool,
    pub own: BoxLine,
    pub opp: BoxLine,
}

impl TeamGame {
    /// Team name when known, otherwise the player.
    pub fn name(&self) -> &str {
        self.team
            .as_deref()
            .or(self.player.as_deref())
            .unwrap_or_default()
    }
}

/// Output of [`normalize_games`].
#[derive(Debug, Clone, Default)]
pub struct NormalizedGames {
    pub results: Vec<GameResult>,
    pub team_games: Vec<TeamGame>,
    pub rejected: Vec<Diagnostic>,
}

/// How to read one games sheet.
#[derive(Debug, Clone)]
pub struct GameSheet<'a> {
    pub league: &'a League,
    pub phase: Phase,
    pub sides: Sides,
    /// Season used for rows without a `season` column (per-season sheets).
    pub season: Option<Season>,
}

/// Check every row of `table`, keeping the good games and reporting the rest.
pub fn normalize_games(table: &Table, sheet: &GameSheet<'_>) -> NormalizedGames {
    let mut out = NormalizedGames::default();

    for row in table.rows() {
        match parse_game(&row, sheet) {
            Ok(game) => {
                out.team_games.extend(game.team_games());
                out.results.push(game);
            }
            Err(reason) => out
                .rejected
                .push(Diagnostic::for_row(table.name(), &row, reason).logged()),
        }
    }

    out
}

fn parse_game(row: &Row<'_>, sheet: &GameSheet<'_>) -> Result<GameResult, String> {
    let away = row.text("away").ok_or("missing away side")?;
    let home = row.text("home").ok_or("missing home side")?;
    if away == home {
        return Err(format!("{} is listed as both away and home", away));
    }

    let away_score = row
        .count("a_score")
        .ok_or("away score is not a non-negative integer")?;
    let home_score = row
        .count("h_score")
        .ok_or("home score is not a non-negative integer")?;
    if away_score == home_score {
        return Err(format!("tied score {}-{}", away_score, home_score));
    }

    let season = if row.cell("season").is_null() {
        sheet.season.ok_or("missing season")?
    } else {
        row.count("season")
            .and_then(|s| u16::try_from(s).ok())
            .map(Season::new)
            .ok_or("season is not a whole number")?
    };

    let (week, round) = match sheet.phase {
        Phase::Regular => {
            let week = row
                .count("week")
                .and_then(|w| u16::try_from(w).ok())
                .ok_or("week is not a whole number")?;
            (Some(Week::new(week)), None)
        }
        Phase::Playoffs => (None, Some(row.text("round").ok_or("missing round")?)),
    };

    let innings = row.number("ip");
    if innings.is_some_and(|ip| ip < 0.0) {
        return Err("innings played is negative".to_string());
    }

    let away_win = away_score > home_score;
    let winner = if away_win { away.clone() } else { home.clone() };

    Ok(GameResult {
        league: sheet.league.clone(),
        season,
        week,
        round,
        away,
        home,
        away_score,
        home_score,
        innings,
        winner,
        away_win,
        home_win: !away_win,
        run_rule: innings.is_some_and(|ip| ip <= RUN_RULE_INNINGS),
        away_stats: BoxLine::from_row(row, "a_"),
        home_stats: BoxLine::from_row(row, "h_"),
        phase: sheet.phase,
        sides: sheet.sides,
    })
}
