//! Generic element-wise tolerance comparator.

use crate::error::{ConvergenceError, Result};

/// Thresholds for one partition of unknowns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Relative step tolerance
    pub rel: f64,
    /// Absolute step tolerance, in the unknown's own unit
    pub abs: f64,
    /// Absolute residual tolerance, in the residual equation's unit
    pub residual_abs: f64,
}

impl Tolerances {
    /// Create a new set of thresholds.
    pub fn new(rel: f64, abs: f64, residual_abs: f64) -> Self {
        Self {
            rel,
            abs,
            residual_abs,
        }
    }
}

/// Outcome of a convergence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergenceVerdict {
    /// Overall verdict
    pub converged: bool,
    /// Per-unknown flags, filled only in diagnostic mode
    pub details: Vec<bool>,
}

impl ConvergenceVerdict {
    /// A passing verdict with no detail.
    pub fn vacuous() -> Self {
        Self {
            converged: true,
            details: Vec::new(),
        }
    }

    /// Whether the iterate has converged.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Index of the first failing unknown in the detail list.
    pub fn first_failure(&self) -> Option<usize> {
        self.details.iter().position(|ok| !ok)
    }

    /// Combine with a verdict for the following unknowns.
    pub fn and(mut self, other: ConvergenceVerdict) -> Self {
        self.converged = self.converged && other.converged;
        self.details.extend(other.details);
        self
    }
}

/// Check one partition of unknowns against a set of tolerances.
///
/// * Aggregate (`diagnostic == false`): converged iff for every `i`
///   `|dx[i]| <= rel * |x[i] + dx[i]| + abs` and `|residuum[i]| <= residual_abs`.
///   The detail list is empty.
/// * Diagnostic: for each `i` in order, records
///   `|dx[i]| < rel * |x[i]| + abs && |residuum[i]| < residual_abs` and stops
///   after the first `false`.
///
/// Empty input always converges. Any NaN makes the affected test fail.
pub fn element_check(
    x: &[f64],
    dx: &[f64],
    residuum: &[f64],
    tolerances: Tolerances,
    diagnostic: bool,
) -> Result<ConvergenceVerdict> {
    if dx.len() != x.len() {
        return Err(ConvergenceError::dimension_mismatch("dx", x.len(), dx.len()));
    }
    if residuum.len() != x.len() {
        return Err(ConvergenceError::dimension_mismatch(
            "residuum",
            x.len(),
            residuum.len(),
        ));
    }

    // No unknowns of this kind, e.g. a circuit without voltage-defined elements.
    if x.is_empty() {
        return Ok(ConvergenceVerdict::vacuous());
    }

    let Tolerances {
        rel,
        abs,
        residual_abs,
    } = tolerances;

    if !diagnostic {
        let step_ok = x
            .iter()
            .zip(dx)
            .all(|(&xi, &dxi)| dxi.abs() <= rel * (xi + dxi).abs() + abs);
        let residual_ok = residuum.iter().all(|r| r.abs() <= residual_abs);
        return Ok(ConvergenceVerdict {
            converged: step_ok && residual_ok,
            details: Vec::new(),
        });
    }

    let mut details = Vec::with_capacity(x.len());
    for (i, ((&xi, &dxi), &ri)) in x.iter().zip(dx).zip(residuum).enumerate() {
        let ok = dxi.abs() < rel * xi.abs() + abs && ri.abs() < residual_abs;
        details.push(ok);
        if !ok {
            log::trace!("unknown {i} failed: |dx| = {:e}, |residuum| = {:e}", dxi.abs(), ri.abs());
            break;
        }
    }

    Ok(ConvergenceVerdict {
        converged: !details.contains(&false),
        details,
    })
}
