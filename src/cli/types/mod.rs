//! Type-safe wrappers for league, season and week identifiers.

pub mod league;
pub mod time;

pub use league::{League, Phase};
pub use time::{Season, SeasonKey, Week};
