//! # Circuit Convergence
//!
//! Convergence evaluation for Newton-Raphson iteration in MNA circuit
//! solvers.
//!
//! This library provides:
//! - A dual relative/absolute tolerance test over node voltages and branch
//!   currents, with residuals judged in their equation's unit
//! - SPICE-style tolerance configuration (`.options ver= vea= ier= iea=`)
//! - Per-unknown diagnostic reports
//! - Small solver-side helpers (matrix reshaping, combinations, sweeps)
//!
//! ## Architecture
//!
//! - [`convergence`] - The evaluator and its element-wise comparator
//! - [`options`] - Tolerance configuration and the options deck parser
//! - [`report`] - Formatting of per-unknown results
//! - [`utils`] - Helper collaborators used around the solver
//! - [`input`] - Iterate table reader (CLI only)
//!
//! ## Usage
//!
//! ```
//! use circuit_convergence::{ConvergenceEvaluator, ToleranceConfig};
//!
//! let evaluator = ConvergenceEvaluator::new(ToleranceConfig::default());
//!
//! // Two node voltages followed by one branch current
//! let x = [5.0, 2.5, 1e-3];
//! let dx = [1e-9, -1e-9, 1e-13];
//! let residuum = [1e-12, 0.0, 1e-9];
//!
//! let verdict = evaluator.evaluate(&x, &dx, &residuum, 2, false)?;
//! assert!(verdict.converged);
//! # Ok::<(), circuit_convergence::ConvergenceError>(())
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! convcheck iterate.txt --nv 2 --options tolerances.opt --diagnostic --forward-diagnostics
//! ```
//!
//! ## Convergence Criterion
//!
//! An iterate is accepted when every unknown satisfies
//!
//! ```text
//! |dx| <= rel * |x + dx| + abs      and      |residuum| <= residual_abs
//! ```
//!
//! where node voltages use `(ver, vea, iea)` and branch currents use
//! `(ier, iea, vea)`.

pub mod convergence;
pub mod error;
pub mod options;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub mod input;

// Re-export main types for convenience
pub use convergence::{ConvergenceEvaluator, ConvergenceVerdict, PartitionKind};
pub use error::{ConvergenceError, Result};
pub use options::ToleranceConfig;
pub use report::ConvergenceReport;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmConvergence;
