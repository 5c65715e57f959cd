//! Error types for the XBL stats pipeline

use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Missing input {name}: cannot find {}", path.display())]
    MissingInput { name: String, path: PathBuf },

    #[error("Input {name} is not a spreadsheet export: {message}")]
    MalformedInput { name: String, message: String },

    #[error("Invalid config field `{field}`: {message}")]
    Config { field: String, message: String },

    #[error("Sheets API key not provided and {env_var} environment variable not set")]
    MissingApiKey { env_var: String },

    #[error("Player {player} has no {league} team for season {season}")]
    UnresolvedPlayer {
        player: String,
        league: String,
        season: u16,
    },

    #[error("Query `{query}' cannot be found")]
    QueryNotFound { query: String },

    #[error("Query must begin with either 'season' or 'career'")]
    InvalidQueryRoot,
}
