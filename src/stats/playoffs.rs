//! How each team is doing in each playoff round.

use serde::Serialize;
use std::collections::BTreeMap;

use super::games::TeamGame;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayoffRound {
    pub round: String,
    pub team: String,
    pub opponent: String,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayoffTeamRecord {
    pub team: String,
    pub rounds: BTreeMap<String, PlayoffRound>,
}

/// Walk playoff records in order. The opponent of a round is whoever the team
/// met first in it.
pub fn build_playoff_records<'a>(
    games: impl IntoIterator<Item = &'a TeamGame>,
) -> BTreeMap<String, PlayoffTeamRecord> {
    let mut records: BTreeMap<String, PlayoffTeamRecord> = BTreeMap::new();

    for game in games {
        let Some(round) = game.round.as_ref() else {
            continue;
        };
        let team = game.name();
        let opponent = game
            .opponent
            .as_deref()
            .or(game.opponent_player.as_deref())
            .unwrap_or_default();

        let record = records
            .entry(team.to_string())
            .or_insert_with(|| PlayoffTeamRecord {
                team: team.to_string(),
                rounds: BTreeMap::new(),
            });
        let this_round = record
            .rounds
            .entry(round.clone())
            .or_insert_with(|| PlayoffRound {
                round: round.clone(),
                team: team.to_string(),
                opponent: opponent.to_string(),
                wins: 0,
                losses: 0,
            });
        this_round.wins += u32::from(game.win);
        this_round.losses += u32::from(game.loss);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::types::{League, Phase},
        sheets::Table,
        stats::games::{normalize_games, GameSheet, Sides},
    };
    use serde_json::{json, Value};

    fn playoff_games(rows: Value) -> Vec<TeamGame> {
        let values: Vec<Vec<Value>> = serde_json::from_value(rows).unwrap();
        let table = Table::from_values(
            "XBL Playoffs",
            &values,
            &["round".to_string(), "away".to_string(), "home".to_string()],
        );
        let league = League::new("XBL");
        normalize_games(
            &table,
            &GameSheet {
                league: &league,
                phase: Phase::Playoffs,
                sides: Sides::Teams,
                season: Some(crate::cli::types::Season::new(5)),
            },
        )
        .team_games
    }

    #[test]
    fn test_round_records() {
        let games = playoff_games(json!([
            ["Round", "Away", "A. Score", "H. Score", "Home", "IP"],
            ["Semis", "A", "3", "1", "B", "9"],
            ["Semis", "B", "2", "5", "A", "9"],
            ["Semis", "A", "0", "4", "B", "9"]
        ]));
        let records = build_playoff_records(&games);

        let a = &records["A"].rounds["Semis"];
        assert_eq!((a.wins, a.losses), (2, 1));
        assert_eq!(a.opponent, "B");
        let b = &records["B"].rounds["Semis"];
        assert_eq!((b.wins, b.losses), (1, 2));
        assert_eq!(b.opponent, "A");
    }

    #[test]
    fn test_rounds_are_tracked_separately() {
        let games = playoff_games(json!([
            ["Round", "Away", "A. Score", "H. Score", "Home"],
            ["Quarters", "A", "3", "1", "C"],
            ["Semis", "A", "1", "2", "B"]
        ]));
        let records = build_playoff_records(&games);

        assert_eq!(records["A"].rounds.len(), 2);
        assert_eq!(records["A"].rounds["Quarters"].opponent, "C");
        assert_eq!(records["A"].rounds["Semis"].losses, 1);
        assert_eq!(records["C"].rounds["Quarters"].losses, 1);
    }
}
