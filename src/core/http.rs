//! HTTP utilities for the Sheets values API

use crate::{config::API_KEY_ENV_VAR, error::StatsError, Result};

/// Base path for the Sheets v4 API.
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// URL of one tab's cell values. The API key is sent as a query parameter.
pub fn values_url(document_id: &str, encoded_tab: &str) -> String {
    format!("{SHEETS_BASE_URL}/{}/values/{}", document_id, encoded_tab)
}

/// Resolve the API key from the option or the environment variable.
pub fn resolve_api_key(api_key: Option<String>) -> Result<String> {
    api_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            std::env::var(API_KEY_ENV_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty())
        })
        .ok_or_else(|| StatsError::MissingApiKey {
            env_var: API_KEY_ENV_VAR.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_url() {
        assert_eq!(
            values_url("doc123", "Box%20Scores"),
            "https://sheets.googleapis.com/v4/spreadsheets/doc123/values/Box%20Scores"
        );
    }

    #[test]
    fn test_resolve_api_key_from_option() {
        let key = resolve_api_key(Some("abc".to_string())).unwrap();
        assert_eq!(key, "abc");
    }

    #[test]
    fn test_resolve_api_key_env_and_missing() {
        std::env::set_var(API_KEY_ENV_VAR, "from-env");
        assert_eq!(resolve_api_key(None).unwrap(), "from-env");
        // A blank option falls through to the environment
        assert_eq!(resolve_api_key(Some(" ".to_string())).unwrap(), "from-env");

        std::env::remove_var(API_KEY_ENV_VAR);
        match resolve_api_key(None) {
            Err(StatsError::MissingApiKey { env_var }) => assert_eq!(env_var, API_KEY_ENV_VAR),
            other => panic!("Expected MissingApiKey error, got {:?}", other),
        }
    }
}
