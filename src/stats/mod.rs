//! Stat aggregation: from raw game rows to team, season and career stat lines.
//!
//! - `games`: per-game checks and the two mirrored team-game records per game
//! - `tally`: running sums per team or player
//! - `computed`: rate and ratio stats from a tally
//! - `standings`, `playoffs`: season standings and playoff round records
//! - `players`, `careers`: who played where, and career folds across seasons

pub mod careers;
pub mod computed;
pub mod games;
pub mod players;
pub mod playoffs;
pub mod quality;
pub mod safe_num;
pub mod season;
pub mod standings;
pub mod tally;

pub use careers::CareerFold;
pub use computed::{compute_stat_line, StatLine};
pub use games::{normalize_games, GameResult, GameSheet, Sides, TeamGame};
pub use players::{Player, Roster, TeamSeason};
pub use quality::{Diagnostic, QualityReport};
pub use safe_num::SafeNum;
pub use season::{build_season_stats, SeasonTables};
pub use tally::RawTally;
