//! Fetch command implementation

use reqwest::Client;
use std::path::Path;
use tracing::info;

use crate::{
    config::StatsConfig, core::resolve_api_key, pipeline::required_sheets,
    sheets::http::fetch_sheets, Result,
};

/// Save every sheet the configured leagues need into `save_dir`.
pub async fn handle_fetch(
    config: &StatsConfig,
    save_dir: &Path,
    api_key: Option<String>,
) -> Result<()> {
    let api_key = resolve_api_key(api_key)?;
    let sheets = required_sheets(config);

    info!(
        "fetching {} sheets for {} leagues",
        sheets.len(),
        config.leagues.len()
    );

    // tarpaulin::skip - HTTP call
    let client = Client::new();
    let saved = fetch_sheets(&client, &api_key, config, &sheets, save_dir).await?;

    println!("Saved {} sheets to {}", saved.len(), save_dir.display()); // tarpaulin::skip
    Ok(())
}
