//! Small helpers used around the solver: matrix reshaping, combinatorics,
//! sweep generation, temperature units and file checks.

pub mod combinations;
pub mod matrix;
pub mod sweep;
pub mod temperature;

use std::path::{Path, PathBuf};

use crate::error::{ConvergenceError, Result};

pub use combinations::Combinations;
pub use matrix::DenseMatrix;
pub use sweep::{LinearSweep, LogSweep};
pub use temperature::{celsius_to_kelvin, kelvin_to_celsius};

/// Machine precision of `f64`.
pub const EPS: f64 = f64::EPSILON;

/// Resolve `path` to an absolute path, requiring it to be a regular file.
pub fn check_file(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|e| ConvergenceError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    if !absolute.exists() {
        log::error!("{} not found.", absolute.display());
        return Err(ConvergenceError::FileNotFound {
            path: absolute.display().to_string(),
        });
    }
    if !absolute.is_file() {
        log::error!("{} is not a file.", absolute.display());
        return Err(ConvergenceError::NotAFile {
            path: absolute.display().to_string(),
        });
    }
    Ok(absolute)
}

/// Smallest power of two `e` such that `1.0 + e != 1.0`, found by halving.
pub fn machine_epsilon() -> f64 {
    let mut eps = 1.0f64;
    while 1.0 + eps / 2.0 > 1.0 {
        eps /= 2.0;
    }
    eps
}

/// `n!`, with `0! = 1`. Saturates at `u64::MAX`.
pub fn factorial(n: u32) -> u64 {
    (2..=u64::from(n)).fold(1u64, |acc, k| acc.saturating_mul(k))
}
