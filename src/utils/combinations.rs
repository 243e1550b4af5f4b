//! k-combinations without repetition.

use std::iter::FusedIterator;

use crate::error::{ConvergenceError, Result};

/// Lazy iterator over the k-element subsets of a slice.
///
/// Subsets are produced in lexicographic order of their indices, each one
/// preserving the order of the source slice.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'a, T: Clone> Combinations<'a, T> {
    /// Create the iterator. Fails if `k` is zero or larger than the set.
    pub fn new(items: &'a [T], k: usize) -> Result<Self> {
        if k == 0 || k > items.len() {
            return Err(ConvergenceError::InvalidCombination {
                set_len: items.len(),
                k,
            });
        }
        Ok(Self {
            items,
            indices: (0..k).collect(),
            exhausted: false,
        })
    }

    fn advance(&mut self) {
        let n = self.items.len();
        let k = self.indices.len();
        // Rightmost index that can still move
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            self.exhausted = true;
            return;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.iter().map(|&i| self.items[i].clone()).collect();
        self.advance();
        Some(current)
    }
}

impl<T: Clone> FusedIterator for Combinations<'_, T> {}
