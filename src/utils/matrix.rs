//! Dense row-major matrix with the reshaping operations used while
//! assembling an MNA system (adding a branch row/column, eliminating the
//! ground node).

use crate::error::{ConvergenceError, Result};

/// Dense matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl DenseMatrix {
    /// Create a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a matrix from row vectors of equal length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(ConvergenceError::dimension_mismatch("matrix row", cols, row.len()));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Add to element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] += value;
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Append a zero column and/or a zero row.
    pub fn expand(&self, add_row: bool, add_col: bool) -> Self {
        let cols = self.cols + usize::from(add_col);
        let rows = self.rows + usize::from(add_row);
        let mut out = Self::zeros(rows, cols);
        for r in 0..self.rows {
            out.data[r * cols..r * cols + self.cols].copy_from_slice(self.row(r));
        }
        out
    }

    /// Remove row `row` and column `col`.
    ///
    /// An index at or beyond the matrix dimension leaves that axis untouched,
    /// so `remove_row_and_col(1, usize::MAX)` drops only row 1.
    pub fn remove_row_and_col(&self, row: usize, col: usize) -> Self {
        let keep_row = |r: usize| r != row;
        let keep_col = |c: usize| c != col;
        let rows = (0..self.rows).filter(|&r| keep_row(r)).count();
        let cols = (0..self.cols).filter(|&c| keep_col(c)).count();

        let mut data = Vec::with_capacity(rows * cols);
        for r in (0..self.rows).filter(|&r| keep_row(r)) {
            data.extend(
                self.row(r)
                    .iter()
                    .enumerate()
                    .filter(|&(c, _)| keep_col(c))
                    .map(|(_, &v)| v),
            );
        }
        Self { data, rows, cols }
    }

    /// Remove row `row`.
    pub fn remove_row(&self, row: usize) -> Result<Self> {
        if row >= self.rows {
            return Err(ConvergenceError::IndexOutOfRange {
                index: row,
                len: self.rows,
                axis: "Row",
            });
        }
        let mut data = self.data.clone();
        data.drain(row * self.cols..(row + 1) * self.cols);
        Ok(Self {
            data,
            rows: self.rows - 1,
            cols: self.cols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DenseMatrix {
        DenseMatrix::from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_expand_row_and_col() {
        let m = sample().expand(true, true);
        assert_eq!((m.rows(), m.cols()), (4, 4));
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0, 0.0]);
        assert_eq!(m.row(3), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_expand_col_only() {
        let m = sample().expand(false, true);
        assert_eq!((m.rows(), m.cols()), (3, 4));
        assert_eq!(m.row(2), &[7.0, 8.0, 9.0, 0.0]);
    }

    #[test]
    fn test_expand_row_only() {
        let m = sample().expand(true, false);
        assert_eq!((m.rows(), m.cols()), (4, 3));
        assert_eq!(m.get(1, 1), 5.0);
    }

    #[test]
    fn test_remove_row_and_col() {
        let m = sample().remove_row_and_col(0, 0);
        assert_eq!(m, DenseMatrix::from_rows(&[vec![5.0, 6.0], vec![8.0, 9.0]]).unwrap());

        let m = sample().remove_row_and_col(1, 2);
        assert_eq!(m, DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![7.0, 8.0]]).unwrap());
    }

    #[test]
    fn test_remove_row_and_col_out_of_range_keeps_axis() {
        let m = sample().remove_row_and_col(1, 10);
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.row(1), &[7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_remove_row() {
        let m = sample().remove_row(2).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);

        let err = sample().remove_row(3).unwrap_err();
        assert!(matches!(err, ConvergenceError::IndexOutOfRange { index: 3, len: 3, .. }));
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = DenseMatrix::from_rows(&[vec![1.0], vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, ConvergenceError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_add_accumulates() {
        let mut m = DenseMatrix::zeros(2, 2);
        m.add(0, 1, 1.5);
        m.add(0, 1, 0.5);
        m.set(1, 0, -1.0);
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), -1.0);
    }
}
