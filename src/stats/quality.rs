//! Rows the build had to leave out, and why.

use serde::Serialize;
use tracing::warn;

use crate::sheets::Row;

/// One rejected source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Sheet the row came from, e.g. `XBL Box Scores`.
    pub source: String,
    /// Row number in the sheet.
    pub line: usize,
    pub reason: String,
    /// The row's cells, comma separated.
    pub row: String,
}

impl Diagnostic {
    pub fn for_row(source: &str, row: &Row<'_>, reason: impl Into<String>) -> Self {
        Self {
            source: source.to_string(),
            line: row.line(),
            reason: reason.into(),
            row: row.describe(),
        }
    }

    /// Log this diagnostic at warn level and hand it back.
    pub fn logged(self) -> Self {
        warn!(
            "skipping {} row {}: {} [{}]",
            self.source, self.line, self.reason, self.row
        );
        self
    }
}

/// Every row excluded from aggregation during one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    pub skipped: Vec<Diagnostic>,
}

impl QualityReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.skipped.extend(diagnostics);
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Order by source sheet then row, so reports from parallel builds are stable.
    pub fn sorted(mut self) -> Self {
        self.skipped
            .sort_by(|a, b| a.source.cmp(&b.source).then(a.line.cmp(&b.line)));
        self
    }
}
