use reqwest::Client;
use tracing::info;

use super::{source::SheetRef, types::ValuesEnvelope};
use crate::{
    config::StatsConfig,
    core::{cache::encode_tab, values_url, write_string},
    error::StatsError,
    Result,
};
use std::path::{Path, PathBuf};

/// Fetch one tab's cell values. The body is checked to be a values envelope
/// before it is returned so an error page never lands in the cache.
pub async fn get_sheet_values(
    client: &Client,
    api_key: &str,
    document_id: &str,
    sheet: &SheetRef,
) -> Result<String> {
    let url = values_url(document_id, &encode_tab(&sheet.tab()));
    let params = [("key", api_key)];

    let body = client
        .get(&url)
        .query(&params)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    serde_json::from_str::<ValuesEnvelope>(&body).map_err(|e| StatsError::MalformedInput {
        name: sheet.to_string(),
        message: e.to_string(),
    })?;

    Ok(body)
}

/// Download every sheet in `sheets` into `save_dir`, one request at a time.
pub async fn fetch_sheets(
    client: &Client,
    api_key: &str,
    config: &StatsConfig,
    sheets: &[SheetRef],
    save_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut saved = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let Some(document_id) = sheet.document_id(config) else {
            return Err(StatsError::Config {
                field: "leagues.sheet_id".to_string(),
                message: format!("no spreadsheet document configured for {}", sheet),
            });
        };

        info!("requesting {}...", sheet);
        let body = get_sheet_values(client, api_key, document_id, sheet).await?;

        let path = sheet.path_in(save_dir);
        write_string(&path, &body)?;
        info!("saved {} to {}", sheet, path.display());
        saved.push(path);
    }
    Ok(saved)
}
