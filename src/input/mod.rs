//! Iterate table I/O for the CLI frontend.
//!
//! A table holds one unknown per line as three whitespace-separated numbers,
//! `x dx residuum`, in MNA order (node voltages first). Numbers accept the
//! same engineering suffixes as the options deck. `#` starts a comment.
//!
//! ```text
//! # x        dx       residuum
//! 5.0        1n       0
//! 2.5        -3n      10p
//! 1.2m       1p       1u     # I(VIN)
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{ConvergenceError, Result};
use crate::options::parse_value;

/// Column-wise view of an iterate table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterateTable {
    /// Current iterate
    pub x: Vec<f64>,
    /// Last Newton update
    pub dx: Vec<f64>,
    /// Equation residuals
    pub residuum: Vec<f64>,
}

impl IterateTable {
    /// Number of unknowns.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the table has no unknowns.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Parse a table from text.
    pub fn parse(input: &str) -> Result<Self> {
        let mut table = Self::default();

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(ConvergenceError::input(
                    line_no,
                    format!("expected 3 columns (x dx residuum), found {}", fields.len()),
                ));
            }

            let mut values = [0.0; 3];
            for (slot, text) in values.iter_mut().zip(&fields) {
                *slot = parse_value(text).ok_or_else(|| ConvergenceError::InvalidValue {
                    line: line_no,
                    text: text.to_string(),
                })?;
            }

            table.x.push(values[0]);
            table.dx.push(values[1]);
            table.residuum.push(values[2]);
        }

        log::debug!("read iterate table with {} unknowns", table.len());
        Ok(table)
    }

    /// Read a table from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConvergenceError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Read a table from stdin until EOF.
    pub fn from_stdin() -> Result<Self> {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| ConvergenceError::FileReadError {
                path: "<stdin>".to_string(),
                source: e,
            })?;
        Self::parse(&content)
    }
}
