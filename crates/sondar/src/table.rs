//! Tabular test data for data-driven tests.
//!
//! A rectangular two-dimensional string grid, produced by an external
//! spreadsheet-table extractor. This crate only consumes the grid; it never
//! parses spreadsheet formats itself.

use crate::result::{SondarError, SondarResult};

/// A rectangular grid of test data cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Build a table from extracted rows.
    ///
    /// Every row must have the same number of columns.
    pub fn from_rows<R, C>(rows: R) -> SondarResult<Self>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = String>,
    {
        let rows: Vec<Vec<String>> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        if let Some(width) = rows.first().map(Vec::len) {
            for (index, row) in rows.iter().enumerate() {
                if row.len() != width {
                    return Err(SondarError::config(format!(
                        "ragged table: row {index} has {} cells, expected {width}",
                        row.len()
                    )));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Cell at (row, column), if in range
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column)).map(String::as_str)
    }

    /// Number of data rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (0 for an empty table)
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Whether the table holds no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
