//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod stats_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let stats_error = StatsError::from(json_error);

        match stats_error {
            StatsError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let stats_error = StatsError::from(io_error);

        match stats_error {
            StatsError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("leagues = [").unwrap_err();
        let stats_error = StatsError::from(toml_error);

        match stats_error {
            StatsError::Toml(_) => (),
            _ => panic!("Expected Toml error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "eighteen".parse::<u16>().unwrap_err();
        let stats_error = StatsError::from(parse_error);

        match stats_error {
            StatsError::InvalidNumber(_) => (),
            _ => panic!("Expected InvalidNumber error variant"),
        }
    }

    #[test]
    fn test_missing_input_names_file() {
        let error = StatsError::MissingInput {
            name: "XBL Standings".to_string(),
            path: PathBuf::from("public/raw/XBL__Standings.json"),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("XBL Standings"));
        assert!(error_string.contains("public/raw/XBL__Standings.json"));
    }

    #[test]
    fn test_missing_api_key_error() {
        let error = StatsError::MissingApiKey {
            env_var: "G_SHEETS_API_KEY".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("API key not provided"));
        assert!(error_string.contains("G_SHEETS_API_KEY"));
    }

    #[test]
    fn test_unresolved_player_error() {
        let error = StatsError::UnresolvedPlayer {
            player: "wishbone".to_string(),
            league: "AA".to_string(),
            season: 12,
        };

        assert_eq!(
            error.to_string(),
            "Player wishbone has no AA team for season 12"
        );
    }

    #[test]
    fn test_config_error_message() {
        let error = StatsError::Config {
            field: "leagues".to_string(),
            message: "at least one league is required".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("`leagues`"));
        assert!(error_string.contains("at least one league"));
    }

    #[test]
    fn test_query_errors() {
        let error = StatsError::QueryNotFound {
            query: "season, XBL, nope".to_string(),
        };
        assert!(error.to_string().contains("season, XBL, nope"));

        assert!(StatsError::InvalidQueryRoot
            .to_string()
            .contains("'season' or 'career'"));
    }

    #[test]
    fn test_error_debug_format() {
        let error = StatsError::MalformedInput {
            name: "AA Playoffs".to_string(),
            message: "missing `values`".to_string(),
        };
        let debug_string = format!("{:?}", error);
        assert!(debug_string.contains("MalformedInput"));
        assert!(debug_string.contains("AA Playoffs"));
    }
}
