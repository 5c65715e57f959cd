//! Core utilities for the XBL stats CLI
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `cache`: raw sheet cache paths and output file writing
//! - `http`: Sheets API URLs and credential resolution

pub mod cache;
pub mod http;

// Re-export commonly used items for convenience
pub use cache::{raw_sheet_path, try_read_to_string, write_all_or_nothing, write_string};
pub use http::{resolve_api_key, values_url};
