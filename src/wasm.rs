//! WASM bindings for the convergence evaluator.
//!
//! Lets a browser-side solver (or a notebook visualising Newton iterations)
//! reuse the same convergence test as the native crate.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmConvergence } from 'circuit_convergence';
//!
//! await init();
//!
//! const check = WasmConvergence.from_options(`
//!   .options ver=1m vea=1u ier=1m iea=1n
//! `);
//!
//! // x, dx, residuum are Float64Arrays; 2 node voltages, then branch currents
//! const done = check.evaluate(x, dx, residuum, 2);
//! ```

use wasm_bindgen::prelude::*;

use crate::convergence::ConvergenceEvaluator;
use crate::options::{self, ToleranceConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible convergence evaluator.
#[wasm_bindgen]
pub struct WasmConvergence {
    evaluator: ConvergenceEvaluator,
}

#[wasm_bindgen]
impl WasmConvergence {
    /// Create an evaluator from explicit tolerances.
    ///
    /// # Arguments
    /// * `ver` / `vea` - relative / absolute voltage tolerance
    /// * `ier` / `iea` - relative / absolute current tolerance
    #[wasm_bindgen(constructor)]
    pub fn new(ver: f64, vea: f64, ier: f64, iea: f64) -> Result<WasmConvergence, JsValue> {
        let config = ToleranceConfig {
            ver,
            vea,
            ier,
            iea,
        }
        .validated()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmConvergence {
            evaluator: ConvergenceEvaluator::new(config).with_forwarded_diagnostics(true),
        })
    }

    /// Create an evaluator from an options deck.
    #[wasm_bindgen]
    pub fn from_options(deck: &str) -> Result<WasmConvergence, JsValue> {
        let config = options::parse_options(deck).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmConvergence {
            evaluator: ConvergenceEvaluator::new(config).with_forwarded_diagnostics(true),
        })
    }

    /// Aggregate convergence test of a full iterate.
    #[wasm_bindgen]
    pub fn evaluate(
        &self,
        x: &[f64],
        dx: &[f64],
        residuum: &[f64],
        partition_index: usize,
    ) -> Result<bool, JsValue> {
        self.evaluator
            .evaluate(x, dx, residuum, partition_index, false)
            .map(|v| v.converged)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Diagnostic test, returning one `1`/`0` per checked unknown.
    ///
    /// Each partition stops at its first failing unknown.
    #[wasm_bindgen]
    pub fn evaluate_detailed(
        &self,
        x: &[f64],
        dx: &[f64],
        residuum: &[f64],
        partition_index: usize,
    ) -> Result<Vec<u8>, JsValue> {
        self.evaluator
            .evaluate(x, dx, residuum, partition_index, true)
            .map(|v| v.details.into_iter().map(u8::from).collect())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
