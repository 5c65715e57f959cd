//! XBL Stats Library
//!
//! Aggregates high-level stats for the XBL, AAA and AA leagues from
//! spreadsheet exports: per-season standings, team stats and game results,
//! and career stats with head-to-head records for every player.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xbl_stats::{config::{BuildConfig, StatsConfig}, pipeline, sheets::JsonDirSource, Season};
//!
//! # fn example() -> xbl_stats::Result<()> {
//! let config = BuildConfig {
//!     stats: StatsConfig::default(),
//!     season: Season::new(12),
//! };
//! let output = pipeline::build(&JsonDirSource::new("public/raw"), &config)?;
//! output.write(std::path::Path::new("public"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! The `fetch` command reads the Sheets API key from:
//! ```bash
//! export G_SHEETS_API_KEY=...
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sheets;
pub mod stats;

// Re-export commonly used types
pub use cli::types::{League, Phase, Season, SeasonKey, Week};
pub use error::{Result, StatsError};
