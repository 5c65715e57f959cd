//! Derived rate and ratio stats.
//!
//! [`compute_stat_line`] is a pure function of a [`RawTally`] and the ERA of
//! the league (or league-season, or all-time scope) the tally belongs to.
//! Every ratio goes through [`SafeNum`], so a zero denominator or a count no
//! game ever reported produces `null` in the output instead of a panic, NaN
//! or infinity.

use serde::Serialize;

use super::{safe_num::SafeNum, tally::RawTally};
use crate::cli::types::Season;


/// Decimal places for ratio stats such as batting average.
pub const RATIO_PLACES: i32 = 3;
/// Decimal places for per-9 rates, FIP and per-game figures.
pub const RATE_PLACES: i32 = 2;

/// A tally plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,

    // hitting
    pub rs: u32,
    pub rs9: SafeNum,
    pub ba: SafeNum,
    pub ab: Option<u32>,
    pub ab9: SafeNum,
    pub h: Option<u32>,
    pub h9: SafeNum,
    pub hr: Option<u32>,
    pub hr9: SafeNum,
    pub abhr: SafeNum,
    pub rbi: Option<u32>,
    pub so: Option<u32>,
    pub so9: SafeNum,
    pub bb: Option<u32>,
    pub bb9: SafeNum,
    pub obp: SafeNum,
    /// Run conversion: hits per run.
    pub rc: SafeNum,
    pub babip: SafeNum,

    // pitching
    pub ra: u32,
    pub ra9: SafeNum,
    pub oppba: SafeNum,
    pub oppab: Option<u32>,
    pub oppab9: SafeNum,
    pub opph: Option<u32>,
    pub opph9: SafeNum,
    pub opphr: Option<u32>,
    pub opphr9: SafeNum,
    pub oppabhr: SafeNum,
    pub oppk: Option<u32>,
    pub oppk9: SafeNum,
    pub oppbb: Option<u32>,
    pub oppbb9: SafeNum,
    pub whip: SafeNum,
    pub lob: SafeNum,
    pub e: Option<u32>,
    pub oppe: Option<u32>,
    pub fip: SafeNum,

    // mixed
    pub rd: i64,
    pub rd9: SafeNum,
    pub innings_played: SafeNum,
    pub innings_game: SafeNum,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub wins_by_run_rule: u32,
    pub losses_by_run_rule: u32,
    pub seasons: Vec<Season>,
}

impl StatLine {
    pub fn for_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn for_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }
}

/// Derive every stat of `tally`. `league_era` is the ERA of the matching scope
/// and only feeds FIP.
pub fn compute_stat_line(tally: &RawTally, league_era: SafeNum) -> StatLine {
    let n = |count: Option<u32>| SafeNum::from(count);

    let r = SafeNum::from(tally.r);
    let oppr = SafeNum::from(tally.oppr);
    let (ab, h, hr, bb, so) = (n(tally.ab), n(tally.h), n(tally.hr), n(tally.bb), n(tally.so));
    let (oppab, opph, opphr, oppbb, oppso) = (
        n(tally.oppab),
        n(tally.opph),
        n(tally.opphr),
        n(tally.oppbb),
        n(tally.oppso),
    );
    let innings_hitting = n(tally.innings_hitting);
    let innings_pitching = n(tally.innings_pitching);

    let per_9_hitting = |count: SafeNum| count / innings_hitting * 9.0;
    let per_9_pitching = |count: SafeNum| count / innings_pitching * 9.0;
    let ratio = |value: SafeNum| value.round(RATIO_PLACES);
    let rate = |value: SafeNum| value.round(RATE_PLACES);

    let innings_played = (innings_hitting + innings_pitching) / 2.0;

    StatLine {
        team: None,
        player: None,

        rs: tally.r,
        rs9: rate(per_9_hitting(r)),
        ba: ratio(h / ab),
        ab: tally.ab,
        ab9: rate(per_9_hitting(ab)),
        h: tally.h,
        h9: rate(per_9_hitting(h)),
        hr: tally.hr,
        hr9: rate(per_9_hitting(hr)),
        abhr: ratio(ab / hr),
        rbi: tally.rbi,
        so: tally.so,
        so9: rate(per_9_hitting(so)),
        bb: tally.bb,
        bb9: rate(per_9_hitting(bb)),
        obp: ratio((h + bb) / (ab + bb)),
        rc: ratio(h / r),
        babip: ratio((h - hr) / (ab - so - hr)),

        ra: tally.oppr,
        ra9: rate(per_9_pitching(oppr)),
        oppba: ratio(opph / oppab),
        oppab: tally.oppab,
        oppab9: rate(per_9_pitching(oppab)),
        opph: tally.opph,
        opph9: rate(per_9_pitching(opph)),
        opphr: tally.opphr,
        opphr9: rate(per_9_pitching(opphr)),
        oppabhr: ratio(oppab / opphr),
        oppk: tally.oppso,
        oppk9: rate(per_9_pitching(oppso)),
        oppbb: tally.oppbb,
        oppbb9: rate(per_9_pitching(oppbb)),
        whip: ratio((opph + oppbb) / innings_pitching),
        lob: ratio((opph + oppbb - oppr) / (opph + oppbb - 1.4 * opphr)),
        e: tally.e,
        oppe: tally.oppe,
        fip: rate(league_era - (opphr * 13.0 + 3.0 * oppbb - 2.0 * oppso) / innings_pitching),

        rd: i64::from(tally.r) - i64::from(tally.oppr),
        rd9: rate(per_9_hitting(r) - per_9_pitching(oppr)),
        innings_played,
        innings_game: rate(innings_played / SafeNum::from(tally.games_played)),
        games_played: tally.games_played,
        wins: tally.wins,
        losses: tally.losses,
        wins_by_run_rule: tally.wins_by_run_rule,
        losses_by_run_rule: tally.losses_by_run_rule,
        seasons: tally.seasons.iter().copied().collect(),
    }
}
