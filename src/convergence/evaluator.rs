//! Partition-aware convergence evaluator.

use std::fmt;

use crate::error::{ConvergenceError, Result};
use crate::options::ToleranceConfig;

use super::check::{element_check, ConvergenceVerdict, Tolerances};

/// Physical kind of an unknown in the MNA vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    /// Node voltage (before the partition index)
    Voltage,
    /// Branch current (at or after the partition index)
    Current,
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKind::Voltage => f.write_str("voltage"),
            PartitionKind::Current => f.write_str("current"),
        }
    }
}

/// Convergence evaluator for one Newton-Raphson solve.
///
/// Holds the tolerance configuration it was built with and nothing else, so
/// a single evaluator can be shared by any number of solver threads.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceEvaluator {
    tolerances: ToleranceConfig,
    /// Pass the `diagnostic` flag of [`evaluate`](Self::evaluate) on to the
    /// partition checks
    forward_diagnostics: bool,
}

impl Default for ConvergenceEvaluator {
    fn default() -> Self {
        Self::new(ToleranceConfig::default())
    }
}

impl ConvergenceEvaluator {
    /// Create an evaluator using the given tolerances.
    ///
    /// `evaluate` runs both partitions in aggregate mode regardless of its
    /// `diagnostic` argument; see [`with_forwarded_diagnostics`](Self::with_forwarded_diagnostics).
    pub fn new(tolerances: ToleranceConfig) -> Self {
        Self {
            tolerances,
            forward_diagnostics: false,
        }
    }

    /// Forward the `diagnostic` flag of `evaluate` to both partition checks.
    pub fn with_forwarded_diagnostics(mut self, forward: bool) -> Self {
        self.forward_diagnostics = forward;
        self
    }

    /// The tolerance configuration in use.
    pub fn tolerances(&self) -> &ToleranceConfig {
        &self.tolerances
    }

    /// Whether `evaluate` forwards its diagnostic flag.
    pub fn forwards_diagnostics(&self) -> bool {
        self.forward_diagnostics
    }

    /// Thresholds applied to unknowns of the given kind.
    pub fn partition_tolerances(&self, kind: PartitionKind) -> Tolerances {
        let t = &self.tolerances;
        match kind {
            // KCL residuals are currents
            PartitionKind::Voltage => Tolerances::new(t.ver, t.vea, t.iea),
            // KVL residuals are voltages
            PartitionKind::Current => Tolerances::new(t.ier, t.iea, t.vea),
        }
    }

    /// Check voltage-like unknowns.
    pub fn voltage_check(
        &self,
        x: &[f64],
        dx: &[f64],
        residuum: &[f64],
        diagnostic: bool,
    ) -> Result<ConvergenceVerdict> {
        element_check(
            x,
            dx,
            residuum,
            self.partition_tolerances(PartitionKind::Voltage),
            diagnostic,
        )
    }

    /// Check current-like unknowns.
    pub fn current_check(
        &self,
        x: &[f64],
        dx: &[f64],
        residuum: &[f64],
        diagnostic: bool,
    ) -> Result<ConvergenceVerdict> {
        element_check(
            x,
            dx,
            residuum,
            self.partition_tolerances(PartitionKind::Current),
            diagnostic,
        )
    }

    /// Check a full MNA iterate.
    ///
    /// `partition_index` is the number of voltage-like unknowns at the front
    /// of the vectors (`0..=x.len()`). The verdict details list voltage-side
    /// flags before current-side flags.
    pub fn evaluate(
        &self,
        x: &[f64],
        dx: &[f64],
        residuum: &[f64],
        partition_index: usize,
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
        if partition_index > x.len() {
            return Err(ConvergenceError::PartitionOutOfRange {
                index: partition_index,
                len: x.len(),
            });
        }

        let diagnostic = diagnostic && self.forward_diagnostics;

        let (xv, xi) = x.split_at(partition_index);
        let (dxv, dxi) = dx.split_at(partition_index);
        let (rv, ri) = residuum.split_at(partition_index);

        let voltage = self.voltage_check(xv, dxv, rv, diagnostic)?;
        let current = self.current_check(xi, dxi, ri, diagnostic)?;

        log::debug!(
            "convergence: {} voltage-like {}, {} current-like {}",
            xv.len(),
            if voltage.converged { "ok" } else { "failed" },
            xi.len(),
            if current.converged { "ok" } else { "failed" },
        );

        Ok(voltage.and(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ToleranceConfig {
        ToleranceConfig::new()
            .with_ver(1e-3)
            .with_vea(1e-6)
            .with_ier(1e-3)
            .with_iea(1e-6)
    }

    #[test]
    fn test_small_step_all_voltage() {
        let eval = ConvergenceEvaluator::new(config());
        let x = [5.0, 5.0];
        let dx = [1e-9, 1e-9];
        let res = [0.0, 0.0];

        let v = eval.voltage_check(&x, &dx, &res, false).unwrap();
        assert_eq!(v, ConvergenceVerdict::vacuous());

        let v = eval.evaluate(&x, &dx, &res, 2, false).unwrap();
        assert!(v.converged);
    }

    #[test]
    fn test_large_step_fails_evaluate() {
        let eval = ConvergenceEvaluator::new(config());
        let v = eval.evaluate(&[5.0], &[1.0], &[0.0], 1, false).unwrap();
        assert!(!v.converged);
        assert!(v.details.is_empty());
    }

    #[test]
    fn test_zero_update_both_sides() {
        let eval = ConvergenceEvaluator::new(config());
        let x = [1.0, -2.0, 3e-3];
        let zeros = [0.0; 3];
        assert!(eval.voltage_check(&x, &zeros, &zeros, false).unwrap().converged);
        assert!(eval.current_check(&x, &zeros, &zeros, false).unwrap().converged);
    }

    #[test]
    fn test_empty_current_partition() {
        let eval = ConvergenceEvaluator::new(config());
        let x = [1.0, 2.0];
        let dx = [0.5, 0.0];
        let res = [0.0, 0.0];

        let current = eval.current_check(&[], &[], &[], false).unwrap();
        assert_eq!(current, ConvergenceVerdict::vacuous());

        let voltage = eval.voltage_check(&x, &dx, &res, false).unwrap();
        let overall = eval.evaluate(&x, &dx, &res, x.len(), false).unwrap();
        assert_eq!(overall.converged, voltage.converged);
        assert!(!overall.converged);
    }

    #[test]
    fn test_empty_voltage_partition() {
        let eval = ConvergenceEvaluator::new(config());
        let x = [1e-3, 2e-3];
        let dx = [1e-12, 0.0];
        let res = [0.0, 1e-7];

        let current = eval.current_check(&x, &dx, &res, false).unwrap();
        let overall = eval.evaluate(&x, &dx, &res, 0, false).unwrap();
        assert_eq!(overall.converged, current.converged);
        assert!(overall.converged);
    }

    #[test]
    fn test_voltage_residual_uses_current_tolerance() {
        let x = [1.0];
        let dx = [0.0];
        let res = [1e-5];

        let loose = ConvergenceEvaluator::new(config().with_iea(1e-4));
        let tight = ConvergenceEvaluator::new(config().with_iea(1e-6));
        assert!(loose.voltage_check(&x, &dx, &res, false).unwrap().converged);
        assert!(!tight.voltage_check(&x, &dx, &res, false).unwrap().converged);

        // Changing vea does not move the voltage residual test
        let vea_changed = ConvergenceEvaluator::new(config().with_iea(1e-4).with_vea(1e-9));
        assert!(vea_changed.voltage_check(&x, &dx, &res, false).unwrap().converged);
    }

    #[test]
    fn test_current_residual_uses_voltage_tolerance() {
        let x = [1.0];
        let dx = [0.0];
        let res = [1e-5];

        let loose = ConvergenceEvaluator::new(config().with_vea(1e-4));
        let tight = ConvergenceEvaluator::new(config().with_vea(1e-6));
        assert!(loose.current_check(&x, &dx, &res, false).unwrap().converged);
        assert!(!tight.current_check(&x, &dx, &res, false).unwrap().converged);

        let iea_changed = ConvergenceEvaluator::new(config().with_vea(1e-4).with_iea(1e-9));
        assert!(iea_changed.current_check(&x, &dx, &res, false).unwrap().converged);
    }

    #[test]
    fn test_partition_tolerances_wiring() {
        let cfg = ToleranceConfig {
            ver: 1.0,
            vea: 2.0,
            ier: 3.0,
            iea: 4.0,
        };
        let eval = ConvergenceEvaluator::new(cfg);
        assert_eq!(
            eval.partition_tolerances(PartitionKind::Voltage),
            Tolerances::new(1.0, 2.0, 4.0)
        );
        assert_eq!(
            eval.partition_tolerances(PartitionKind::Current),
            Tolerances::new(3.0, 4.0, 2.0)
        );
    }

    #[test]
    fn test_diagnostic_not_forwarded_by_default() {
        let eval = ConvergenceEvaluator::new(config());
        let x = [1.0, 1.0, 1.0];
        let dx = [0.0, 1.0, 0.0];
        let res = [0.0; 3];

        let v = eval.evaluate(&x, &dx, &res, 2, true).unwrap();
        assert!(!v.converged);
        assert!(v.details.is_empty());
    }

    #[test]
    fn test_diagnostic_forwarded() {
        let eval = ConvergenceEvaluator::new(config()).with_forwarded_diagnostics(true);
        assert!(eval.forwards_diagnostics());

        let x = [1.0, 1.0, 1.0, 1.0];
        let dx = [0.0, 1.0, 0.0, 0.0];
        let res = [0.0; 4];

        // Voltage side stops at index 1, current side runs fully
        let v = eval.evaluate(&x, &dx, &res, 3, true).unwrap();
        assert!(!v.converged);
        assert_eq!(v.details, vec![true, false, true]);

        let v = eval.evaluate(&x, &dx, &res, 3, false).unwrap();
        assert!(v.details.is_empty());
    }

    #[test]
    fn test_partition_out_of_range() {
        let eval = ConvergenceEvaluator::default();
        let err = eval.evaluate(&[1.0], &[0.0], &[0.0], 2, false).unwrap_err();
        assert!(matches!(
            err,
            ConvergenceError::PartitionOutOfRange { index: 2, len: 1 }
        ));
    }

    #[test]
    fn test_evaluate_dimension_mismatch() {
        let eval = ConvergenceEvaluator::default();
        let err = eval.evaluate(&[1.0, 2.0], &[0.0, 0.0], &[0.0], 1, false).unwrap_err();
        assert!(matches!(
            err,
            ConvergenceError::DimensionMismatch { what: "residuum", .. }
        ));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let eval = ConvergenceEvaluator::new(config()).with_forwarded_diagnostics(true);
        let x = [2.0, 1e-3];
        let dx = [1e-7, 1e-10];
        let res = [1e-8, 1e-8];
        let a = eval.evaluate(&x, &dx, &res, 1, true).unwrap();
        let b = eval.evaluate(&x, &dx, &res, 1, true).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.details, vec![true, true]);
    }
}
