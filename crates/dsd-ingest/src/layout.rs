//! Structural constants of the extract grid.

use serde::{Deserialize, Serialize};

/// Where labels, years and amounts sit in the exported sheet grid.
///
/// The defaults mirror the DSD D210000 export: year header in row 5
/// (index 4), account rows 6..=53 (indices 5..=52), labels in column A and
/// amounts in columns B..D. All indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub year_header_row: usize,
    pub label_column: usize,
    pub amount_columns: Vec<usize>,
    pub data_start_row: usize,
    /// Inclusive.
    pub data_end_row: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            year_header_row: 4,
            label_column: 0,
            amount_columns: vec![1, 2, 3],
            data_start_row: 5,
            data_end_row: 52,
        }
    }
}

impl SheetLayout {
    /// Minimum grid width the layout requires.
    pub fn required_columns(&self) -> usize {
        let widest = self
            .amount_columns
            .iter()
            .chain(std::iter::once(&self.label_column))
            .copied()
            .max()
            .unwrap_or(0);
        widest + 1
    }
}

/// Fallback year labels used when the header row carries none, newest first.
/// Positional: the first amount column gets the first label.
pub const DEFAULT_YEARS: [&str; 3] = ["2024-12-31", "2023-12-31", "2022-12-31"];
