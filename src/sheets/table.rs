//! Typed tables built from raw spreadsheet cell ranges.
//!
//! The first row of a range names the columns. Header names are cleaned up
//! (`A. AB` becomes `a_ab`), declared string columns keep their text, and
//! every other column is coerced to a number with unparseable cells turned
//! into nulls. Columns left entirely blank after coercion are dropped.

use serde_json::Value;
use std::collections::HashMap;


/// One typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    fn numeric(raw: &Value) -> Cell {
        let parsed = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Null,
        }
    }

    fn text(raw: &Value) -> Cell {
        let s = match raw {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        };
        if s.is_empty() {
            Cell::Null
        } else {
            Cell::Text(s)
        }
    }

    fn display(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Null => String::new(),
        }
    }
}

/// Lower-case, trim, turn spaces into `_` and drop periods.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_").replace('.', "")
}

/// A header row plus typed data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
struct TableRow {
    line: usize,
    cells: Vec<Cell>,
}

impl Table {
    /// Build a table from a raw cell range. `string_columns` are cleaned
    /// header names whose values stay text.
    pub fn from_values(name: &str, values: &[Vec<Value>], string_columns: &[String]) -> Self {
        let Some((header, body)) = values.split_first() else {
            return Self::with_columns(name, Vec::new(), Vec::new());
        };

        let columns: Vec<String> = header
            .iter()
            .map(|h| match h {
                Value::String(s) => normalize_header(s),
                other => normalize_header(&other.to_string()),
            })
            .collect();
        let is_text: Vec<bool> = columns
            .iter()
            .map(|c| string_columns.iter().any(|s| s == c))
            .collect();

        let mut rows = Vec::with_capacity(body.len());
        for (i, raw_row) in body.iter().enumerate() {
            let cells: Vec<Cell> = (0..columns.len())
                .map(|c| match raw_row.get(c) {
                    Some(raw) if is_text[c] => Cell::text(raw),
                    Some(raw) => Cell::numeric(raw),
                    None => Cell::Null,
                })
                .collect();
            // Sheets pad ranges with empty rows; they carry nothing to report.
            if cells.iter().all(Cell::is_null) {
                continue;
            }
            rows.push(TableRow {
                // Header is sheet row 1
                line: i + 2,
                cells,
            });
        }

        Self::with_columns(name, columns, rows).drop_blank_columns()
    }

    fn with_columns(name: &str, columns: Vec<String>, rows: Vec<TableRow>) -> Self {
        let mut index = HashMap::new();
        for (i, c) in columns.iter().enumerate() {
            index.entry(c.clone()).or_insert(i);
        }
        Self {
            name: name.to_string(),
            columns,
            index,
            rows,
        }
    }

    fn drop_blank_columns(self) -> Self {
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|c| !self.columns[c].is_empty() && self.rows.iter().any(|r| !r.cells[c].is_null()))
            .collect();
        if keep.iter().all(|k| *k) {
            return self;
        }

        let columns = self
            .columns
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(c, _)| c.clone())
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|r| TableRow {
                line: r.line,
                cells: r
                    .cells
                    .into_iter()
                    .zip(&keep)
                    .filter(|(_, k)| **k)
                    .map(|(cell, _)| cell)
                    .collect(),
            })
            .collect();
        Self::with_columns(&self.name, columns, rows)
    }

    /// A copy of this table with columns renamed. Names not present are ignored.
    pub fn rename_columns(&self, renames: &[(&str, &str)]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                renames
                    .iter()
                    .find(|(from, _)| from == c)
                    .map(|(_, to)| to.to_string())
                    .unwrap_or_else(|| c.clone())
            })
            .collect();
        Self::with_columns(&self.name, columns, self.rows.clone())
    }

    /// A copy of this table with `prefix` removed from every column that has it.
    pub fn strip_column_prefix(&self, prefix: &str) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| c.strip_prefix(prefix).unwrap_or(c).to_string())
            .collect();
        Self::with_columns(&self.name, columns, self.rows.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |r| Row { table: self, row: r })
    }
}

/// Borrowed view of one data row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    row: &'a TableRow,
}

impl<'a> Row<'a> {
    /// Row number in the source sheet (the header is row 1).
    pub fn line(&self) -> usize {
        self.row.line
    }

    pub fn cell(&self, column: &str) -> &'a Cell {
        static NULL: Cell = Cell::Null;
        self.table
            .index
            .get(column)
            .and_then(|&i| self.row.cells.get(i))
            .unwrap_or(&NULL)
    }

    /// Numeric value of a column; text cells that look like numbers count too.
    pub fn number(&self, column: &str) -> Option<f64> {
        match self.cell(column) {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
            Cell::Null => None,
        }
    }

    /// Non-negative whole number, e.g. a count or a score.
    pub fn count(&self, column: &str) -> Option<u32> {
        self.number(column)
            .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
            .map(|n| n as u32)
    }

    /// Text value of a column; numeric cells are rendered back to text.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.cell(column) {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Null => None,
        }
    }

    /// The raw row, comma separated, for diagnostics.
    pub fn describe(&self) -> String {
        self.row
            .cells
            .iter()
            .map(Cell::display)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
