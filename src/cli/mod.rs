//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::Season;

/// Where spreadsheet exports are read from and which leagues exist
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// TOML file listing leagues and their spreadsheet document ids.
    /// Built-in XBL/AAA/AA defaults are used when omitted.
    #[clap(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[clap(
    name = "xbl-stats",
    about = "Aggregate high-level XBL stats per-season and for careers"
)]
pub struct XblStats {
    /// Write logs to this file instead of stderr.
    #[clap(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Save copies of every spreadsheet tab the stats build reads.
    Fetch {
        #[clap(flatten)]
        source: SourceArgs,

        /// Directory the raw sheet JSON is saved to.
        #[clap(long, short, default_value = "public/raw")]
        save_dir: PathBuf,

        /// Sheets API key (or set `G_SHEETS_API_KEY` env var).
        #[clap(long, short = 'k')]
        api_key: Option<String>,
    },

    /// Build season and career stats from previously fetched sheets.
    Build {
        #[clap(flatten)]
        source: SourceArgs,

        /// Current season number.
        #[clap(long, short)]
        season: Season,

        /// Directory holding the raw sheet JSON.
        #[clap(long, short = 'g', default_value = "public/raw")]
        raw_dir: PathBuf,

        /// Directory the computed stats are written to.
        #[clap(long = "save-dir", short = 'S', default_value = "public")]
        save_dir: PathBuf,

        /// Print part of the result: a list of keys to look up, the first of
        /// which must be `season` or `career`.
        #[clap(long, short = 'Q', num_args = 1..)]
        query: Vec<String>,
    },
}
