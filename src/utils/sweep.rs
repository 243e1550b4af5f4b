//! Sweep point generators for DC and AC analyses.
//!
//! Both generators yield `nsteps` points starting at `min`. The point at
//! index `i` is also available directly through `get(i)`.

use std::iter::FusedIterator;

use crate::error::{ConvergenceError, Result};

/// Evenly spaced points: `min + i * (max - min) / nsteps`.
#[derive(Debug, Clone)]
pub struct LinearSweep {
    min: f64,
    inc: f64,
    nsteps: usize,
    index: usize,
}

impl LinearSweep {
    /// Create a linear sweep.
    pub fn new(min: f64, max: f64, nsteps: usize) -> Result<Self> {
        if nsteps == 0 {
            return Err(ConvergenceError::invalid_sweep("nsteps must be positive"));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(ConvergenceError::invalid_sweep("bounds must be finite"));
        }
        Ok(Self {
            min,
            inc: (max - min) / nsteps as f64,
            nsteps,
            index: 0,
        })
    }

    /// Step between consecutive points.
    pub fn increment(&self) -> f64 {
        self.inc
    }

    /// Point `i`, or `None` past the end of the sweep.
    pub fn get(&self, i: usize) -> Option<f64> {
        (i < self.nsteps).then(|| self.min + self.inc * i as f64)
    }
}

impl Iterator for LinearSweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.nsteps - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for LinearSweep {}
impl FusedIterator for LinearSweep {}

/// Logarithmically spaced points: `min * inc^i` with
/// `inc = 10^((log10 max - log10 min) / nsteps)`.
#[derive(Debug, Clone)]
pub struct LogSweep {
    min: f64,
    inc: f64,
    nsteps: usize,
    index: usize,
}

impl LogSweep {
    /// Create a logarithmic sweep. Both bounds must be positive.
    pub fn new(min: f64, max: f64, nsteps: usize) -> Result<Self> {
        if nsteps == 0 {
            return Err(ConvergenceError::invalid_sweep("nsteps must be positive"));
        }
        if !(min > 0.0 && max > 0.0 && min.is_finite() && max.is_finite()) {
            return Err(ConvergenceError::invalid_sweep(
                "logarithmic bounds must be positive and finite",
            ));
        }
        Ok(Self {
            min,
            inc: 10f64.powf((max.log10() - min.log10()) / nsteps as f64),
            nsteps,
            index: 0,
        })
    }

    /// Ratio between consecutive points.
    pub fn ratio(&self) -> f64 {
        self.inc
    }

    /// Point `i`, or `None` past the end of the sweep.
    pub fn get(&self, i: usize) -> Option<f64> {
        (i < self.nsteps).then(|| self.min * self.inc.powi(i as i32))
    }
}

impl Iterator for LogSweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.nsteps - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for LogSweep {}
impl FusedIterator for LogSweep {}
