//! Newton-Raphson convergence evaluation.
//!
//! The MNA unknown vector is ordered as
//!
//! ```text
//! x = [ v_1 .. v_n | j_1 .. j_m ]
//!       node        branch
//!       voltages    currents
//! ```
//!
//! and the partition index is the position of the first branch current.
//! Each side is judged with its own relative/absolute step tolerances, while
//! the residual of each side is judged with the *other* side's absolute
//! tolerance:
//!
//! | Unknown | Step tolerance | Residual tolerance | Residual equation |
//! |---------|----------------|--------------------|-------------------|
//! | voltage-like | `ver`, `vea` | `iea` | KCL (amperes) |
//! | current-like | `ier`, `iea` | `vea` | KVL (volts) |
//!
//! Two test flavours exist. Aggregate mode checks the whole partition at
//! once against the updated value `x + dx` (inclusive bounds). Diagnostic
//! mode walks the unknowns in order against the previous value `x` (strict
//! bounds), records a pass/fail flag per unknown and stops at the first
//! failure.

mod check;
mod evaluator;

pub use check::{element_check, ConvergenceVerdict, Tolerances};
pub use evaluator::{ConvergenceEvaluator, PartitionKind};
