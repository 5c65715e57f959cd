//! Spreadsheet exports: fetching, caching and loading into typed tables.

pub mod http;
pub mod source;
pub mod table;
pub mod types;

pub use source::{JsonDirSource, MemorySource, SheetRef, TableKind, TableSource};
pub use table::{Cell, Row, Table};
pub use types::ValuesEnvelope;
