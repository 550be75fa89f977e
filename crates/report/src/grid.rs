//! Cell grid abstraction over one report snapshot.

use std::path::Path;

use crate::Result;

/// A single report cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Textual cell
    Text(String),
    /// Numeric cell
    Number(f64),
    /// Blank cell
    Empty,
}

impl Cell {
    /// Trimmed string form, used by every label and metric comparison.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(raw.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Row-major, 0-indexed snapshot of one report. Rows may be ragged.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid from rows of cells.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, col)`, if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    /// Trimmed text of the cell at `(row, col)`, if present.
    pub fn text_at(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).map(Cell::as_text)
    }
}

/// Load a tab-separated report export into a grid.
pub fn read_report(path: impl AsRef<Path>) -> Result<Grid> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_report(&raw))
}

/// Parse tab-separated report text: lines are rows, tabs are cells.
pub fn parse_report(raw: &str) -> Grid {
    let rows = raw
        .lines()
        .map(|line| {
            line.trim_end_matches('\r')
                .split('\t')
                .map(Cell::from)
                .collect()
        })
        .collect();
    Grid::from_rows(rows)
}
