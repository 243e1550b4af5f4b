//! Tolerance configuration for the convergence evaluator.
//!
//! Four scalars control every convergence decision:
//!
//! | Field | Meaning | Default |
//! |-------|---------|---------|
//! | `ver` | relative error on voltage-like unknowns | `1e-3` |
//! | `vea` | absolute error on voltage-like unknowns (volts) | `1e-6` |
//! | `ier` | relative error on current-like unknowns | `1e-3` |
//! | `iea` | absolute error on current-like unknowns (amperes) | `1e-9` |
//!
//! A [`ToleranceConfig`] is built once (from defaults, builder calls, or an
//! options deck via [`parse_options`]) and handed to the evaluator by value.
//! It is never mutated during a solve.

mod parser;

pub use parser::{load_options, parse_options, parse_value};

use crate::error::{ConvergenceError, Result};

/// Default relative tolerance for voltage-like unknowns.
pub const DEFAULT_VER: f64 = 1e-3;

/// Default absolute tolerance for voltage-like unknowns (volts).
pub const DEFAULT_VEA: f64 = 1e-6;

/// Default relative tolerance for current-like unknowns.
pub const DEFAULT_IER: f64 = 1e-3;

/// Default absolute tolerance for current-like unknowns (amperes).
pub const DEFAULT_IEA: f64 = 1e-9;

/// Relative and absolute error thresholds for both kinds of unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceConfig {
    /// Relative error on voltage-like unknowns
    pub ver: f64,
    /// Absolute error on voltage-like unknowns
    pub vea: f64,
    /// Relative error on current-like unknowns
    pub ier: f64,
    /// Absolute error on current-like unknowns
    pub iea: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            ver: DEFAULT_VER,
            vea: DEFAULT_VEA,
            ier: DEFAULT_IER,
            iea: DEFAULT_IEA,
        }
    }
}

impl ToleranceConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voltage relative tolerance.
    pub fn with_ver(mut self, ver: f64) -> Self {
        self.ver = ver;
        self
    }

    /// Set the voltage absolute tolerance (in volts).
    pub fn with_vea(mut self, vea: f64) -> Self {
        self.vea = vea;
        self
    }

    /// Set the current relative tolerance.
    pub fn with_ier(mut self, ier: f64) -> Self {
        self.ier = ier;
        self
    }

    /// Set the current absolute tolerance (in amperes).
    ///
    /// This is also the residual threshold for voltage-like unknowns, whose
    /// equations are KCL current balances.
    pub fn with_iea(mut self, iea: f64) -> Self {
        self.iea = iea;
        self
    }

    /// Check that every tolerance is finite and non-negative.
    pub fn validated(self) -> Result<Self> {
        for (name, value) in [
            ("ver", self.ver),
            ("vea", self.vea),
            ("ier", self.ier),
            ("iea", self.iea),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConvergenceError::InvalidTolerance { name, value });
            }
        }
        Ok(self)
    }

    /// Set a tolerance by its option name. Returns `false` for unknown names.
    pub(crate) fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        match name {
            "ver" => self.ver = value,
            "vea" => self.vea = value,
            "ier" => self.ier = value,
            "iea" => self.iea = value,
            _ => return false,
        }
        true
    }
}
