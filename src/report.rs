use std::fmt;

use crate::experiment::TrialResult;

const COLUMNS: [&str; 3] = ["hidden_layers", "activation", "accuracy"];

/// The comparison table: one row per result, prefixed by its index, every column right
/// aligned to its widest cell.
pub struct ResultsTable<'a> {
    results: &'a [TrialResult],
}

impl<'a> ResultsTable<'a> {
    pub fn new(results: &'a [TrialResult]) -> Self {
        Self { results }
    }

    fn rows(&self) -> Vec<[String; 3]> {
        self.results
            .iter()
            .map(|result| {
                [
                    result.configuration.hidden_layers(),
                    result.configuration.activation.to_string(),
                    format!("{:.6}", result.accuracy),
                ]
            })
            .collect()
    }
}

impl fmt::Display for ResultsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();

        let index_width = rows.len().saturating_sub(1).to_string().len();
        let mut widths = COLUMNS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        write!(f, "{:index_width$}", "")?;
        for (column, width) in COLUMNS.iter().zip(widths) {
            write!(f, "  {column:>width$}")?;
        }
        writeln!(f)?;

        for (i, row) in rows.iter().enumerate() {
            write!(f, "{i:<index_width$}")?;
            for (cell, width) in row.iter().zip(widths) {
                write!(f, "  {cell:>width$}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
