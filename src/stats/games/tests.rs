//! Unit tests for per-game normalization

use super::*;
use crate::stats::{computed::compute_stat_line, safe_num::SafeNum, tally::aggregate_by};
use serde_json::{json, Value};

const BOX_SCORE_HEADER: [&str; 22] = [
    "Week", "Away", "A. Score", "H. Score", "Home", "A. E", "H. E", "IP", "A. AB", "A. R", "A. H",
    "A. HR", "A. RBI", "A. BB", "A. SO", "H. AB", "H. R", "H. H", "H. HR", "H. RBI", "H. BB",
    "H. SO",
];

fn box_scores(rows: Value) -> Table {
    let mut values = vec![json!(BOX_SCORE_HEADER)];
    values.extend(rows.as_array().unwrap().iter().cloned());
    let values: Vec<Vec<Value>> = serde_json::from_value(Value::Array(values)).unwrap();
    Table::from_values(
        "TEST Box Scores",
        &values,
        &["away".to_string(), "home".to_string()],
    )
}

fn normalize(table: &Table, phase: Phase) -> NormalizedGames {
    let league = League::new("TEST");
    normalize_games(
        table,
        &GameSheet {
            league: &league,
            phase,
            sides: Sides::Teams,
            season: Some(Season::new(7)),
        },
    )
}

fn good_game() -> Value {
    json!([1, "hippos", 1, 2, "alligators", 0, 0, 9, 30, 1, 1, 1, 0, 1, 10, 30, 2, 2, 2, 0, 4, 12])
}

#[cfg(test)]
mod outcome_tests {
    use super::*;

    #[test]
    fn test_two_mirrored_records_per_game() {
        let games = normalize(&box_scores(json!([good_game()])), Phase::Regular);
        assert_eq!(games.results.len(), 1);
        assert_eq!(games.team_games.len(), 2);

        let (away, home) = (&games.team_games[0], &games.team_games[1]);
        assert_eq!(away.team.as_deref(), Some("hippos"));
        assert_eq!(away.opponent.as_deref(), Some("alligators"));
        assert_eq!(home.team.as_deref(), Some("alligators"));
        assert_eq!(away.runs_scored, home.runs_allowed);
        assert_eq!(away.runs_allowed, home.runs_scored);
        assert_eq!(away.own, home.opp);
        assert_eq!(away.opp, home.own);
        assert!(away.loss && !away.win);
        assert!(home.win && !home.loss);
        assert_eq!(away.week, Some(Week::new(1)));
        assert_eq!(away.round, None);
        assert_eq!(away.season, Season::new(7));
    }

    #[test]
    fn test_game_result_flags() {
        let games = normalize(&box_scores(json!([good_game()])), Phase::Regular);
        let result = &games.results[0];

        assert_eq!(result.winner, "alligators");
        assert!(!result.away_win);
        assert!(result.home_win);
        // 9 innings is a full game
        assert!(!result.run_rule);
        assert_eq!(result.away_stats.ab, Some(30));
        assert_eq!(result.home_stats.so, Some(12));
        assert_eq!(result.home_stats.e, Some(0));
    }

    #[test]
    fn test_run_rule_goes_to_winner() {
        let games = normalize(
            &box_scores(json!([[2, "hippos", 12, 2, "alligators", 0, 0, 7.5]])),
            Phase::Regular,
        );
        let (away, home) = (&games.team_games[0], &games.team_games[1]);
        assert!(games.results[0].run_rule);
        assert!(away.run_rule_win && !away.run_rule_loss);
        assert!(home.run_rule_loss && !home.run_rule_win);
    }

    #[test]
    fn test_innings_split() {
        let games = normalize(
            &box_scores(json!([[2, "hippos", 3, 2, "alligators", 0, 0, 8.5]])),
            Phase::Regular,
        );
        let (away, home) = (&games.team_games[0], &games.team_games[1]);
        assert_eq!((away.innings_hitting, away.innings_pitching), (Some(9), Some(8)));
        assert_eq!((home.innings_hitting, home.innings_pitching), (Some(8), Some(9)));
    }

    #[test]
    fn test_missing_innings() {
        let table = box_scores(json!([[2, "hippos", 3, 2, "alligators"]]));
        let games = normalize(&table, Phase::Regular);
        assert!(!games.results[0].run_rule);
        assert_eq!(games.results[0].innings, None);
        assert_eq!(games.team_games[0].innings_hitting, None);
    }

    #[test]
    fn test_playoff_rows_carry_round() {
        let values: Vec<Vec<Value>> = serde_json::from_value(json!([
            ["Round", "Away", "A. Score", "H. Score", "Home", "IP"],
            ["Finals", "hippos", "3", "2", "alligators", "9"]
        ]))
        .unwrap();
        let table = Table::from_values(
            "TEST Playoffs",
            &values,
            &["round".to_string(), "away".to_string(), "home".to_string()],
        );
        let games = normalize(&table, Phase::Playoffs);

        let game = &games.team_games[0];
        assert_eq!(game.round.as_deref(), Some("Finals"));
        assert_eq!(game.week, None);
        assert_eq!(game.phase, Phase::Playoffs);

        let json = serde_json::to_value(&games.results[0]).unwrap();
        assert_eq!(json["round"], "Finals");
        assert!(json.get("week").is_none());
    }
}

#[cfg(test)]
mod malformed_tests {
    use super::*;

    #[test]
    fn test_malformed_rows_are_rejected() {
        let table = box_scores(json!([
            good_game(),
            [1, "hippos", "x", 2, "alligators", 0, 0, 9],
            [1, "hippos", 2, 2, "alligators", 0, 0, 9],
            [1, "", 3, 2, "alligators", 0, 0, 9],
            ["wk", "hippos", 3, 2, "alligators", 0, 0, 9],
            [1, "hippos", 3, 2, "hippos", 0, 0, 9],
            [1, "hippos", -3, 2, "alligators", 0, 0, 9],
            [1, "hippos", 3, 2, "alligators", 0, 0, -1]
        ]));
        let games = normalize(&table, Phase::Regular);

        assert_eq!(games.results.len(), 1);
        assert_eq!(games.team_games.len(), 2);
        let reasons: Vec<(usize, &str)> = games
            .rejected
            .iter()
            .map(|d| (d.line, d.reason.as_str()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (3, "away score is not a non-negative integer"),
                (4, "tied score 2-2"),
                (5, "missing away side"),
                (6, "week is not a whole number"),
                (7, "hippos is listed as both away and home"),
                (8, "away score is not a non-negative integer"),
                (9, "innings played is negative"),
            ]
        );
        assert!(games.rejected.iter().all(|d| d.source == "TEST Box Scores"));
    }

    #[test]
    fn test_head_to_head_rows_need_a_season() {
        let values: Vec<Vec<Value>> = serde_json::from_value(json!([
            ["Season", "Week", "Away", "A. Score", "H. Score", "Home"],
            ["3", "1", "wishbone", "3", "2", "gator"],
            ["", "1", "wishbone", "3", "2", "gator"]
        ]))
        .unwrap();
        let table = Table::from_values(
            "XBL Head to Head",
            &values,
            &["away".to_string(), "home".to_string()],
        );
        let league = League::new("XBL");
        let games = normalize_games(
            &table,
            &GameSheet {
                league: &league,
                phase: Phase::Regular,
                sides: Sides::Players,
                season: None,
            },
        );

        assert_eq!(games.results.len(), 1);
        assert_eq!(games.results[0].season, Season::new(3));
        assert_eq!(games.team_games[0].player.as_deref(), Some("wishbone"));
        assert_eq!(games.team_games[0].team, None);
        assert_eq!(games.rejected[0].reason, "missing season");
    }
}

#[cfg(test)]
mod aggregation_tests {
    use super::*;

    fn batting_average(games: &NormalizedGames, team: &str) -> Option<f64> {
        let tallies = aggregate_by(&games.team_games, |g| g.team.clone());
        compute_stat_line(&tallies[team], SafeNum::new(1.0)).ba.value()
    }

    #[test]
    fn test_single_game_batting_averages() {
        let games = normalize(&box_scores(json!([good_game()])), Phase::Regular);
        assert_eq!(batting_average(&games, "hippos"), Some(0.033));
        assert_eq!(batting_average(&games, "alligators"), Some(0.067));
    }

    #[test]
    fn test_disconnect_game_counts_for_record_only() {
        let games = normalize(
            &box_scores(json!([[1, "alligators", 1, 2, "hippos", 0, 0, 9], good_game()])),
            Phase::Regular,
        );
        let tallies = aggregate_by(&games.team_games, |g| g.team.clone());
        let hippos = &tallies["hippos"];

        assert_eq!(hippos.games_played, 2);
        assert_eq!((hippos.wins, hippos.losses), (1, 1));
        assert_eq!(hippos.ab, Some(30));
        assert_eq!(hippos.h, Some(1));
        assert_eq!(batting_average(&games, "hippos"), Some(0.033));
    }

    #[test]
    fn test_garbage_cell_excludes_only_that_field() {
        let games = normalize(
            &box_scores(json!([
                [1, "alligators", 1, 2, "hippos", 0, 0, 9, "bad entry", 1, 1, 1, 0, 1, 10, 30, 2, 2, 2, 0, 4, 12],
                good_game()
            ])),
            Phase::Regular,
        );
        assert!(games.rejected.is_empty());

        let tallies = aggregate_by(&games.team_games, |g| g.team.clone());
        let alligators = &tallies["alligators"];
        // hits from both games, at-bats only from the readable one
        assert_eq!(alligators.h, Some(3));
        assert_eq!(alligators.ab, Some(30));
        assert_eq!(batting_average(&games, "alligators"), Some(0.1));
    }

    #[test]
    fn test_wins_equal_losses_equal_games() {
        let games = normalize(
            &box_scores(json!([
                good_game(),
                [1, "alligators", 5, 2, "otters", 0, 0, 9],
                [2, "otters", 0, 10, "hippos", 0, 0, 6],
                [2, "hippos", 4, 3, "alligators", 0, 0, 9.5]
            ])),
            Phase::Regular,
        );
        let tallies = aggregate_by(&games.team_games, |g| g.team.clone());

        let wins: u32 = tallies.values().map(|t| t.wins).sum();
        let losses: u32 = tallies.values().map(|t| t.losses).sum();
        let scored: u32 = tallies.values().map(|t| t.r).sum();
        let allowed: u32 = tallies.values().map(|t| t.oppr).sum();
        assert_eq!(wins, 4);
        assert_eq!(losses, 4);
        assert_eq!(scored, allowed);
    }

    #[test]
    fn test_run_differential_matches_scores() {
        let games = normalize(
            &box_scores(json!([
                good_game(),
                [2, "hippos", 4, 3, "alligators", 0, 0, 9.5]
            ])),
            Phase::Regular,
        );
        let tallies = aggregate_by(&games.team_games, |g| g.team.clone());
        let hippos = compute_stat_line(&tallies["hippos"], SafeNum::NULL);
        // (1 - 2) + (4 - 3)
        assert_eq!(hippos.rd, 0);
        let alligators = compute_stat_line(&tallies["alligators"], SafeNum::NULL);
        assert_eq!(alligators.rd, 0);
        assert_eq!(hippos.rs, 5);
        assert_eq!(alligators.ra, 5);
    }
}
