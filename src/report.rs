//! Per-unknown convergence reporting.
//!
//! Turns the detail flags of a diagnostic [`ConvergenceVerdict`] into a
//! readable table, naming each unknown after its position in the MNA vector
//! unless the caller supplies names.

use std::fmt;

use crate::convergence::{ConvergenceVerdict, PartitionKind};

/// One row of a [`ConvergenceReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Position in the unknown vector
    pub index: usize,
    /// Display name of the unknown
    pub name: String,
    /// Which partition it belongs to
    pub kind: PartitionKind,
    /// Whether it passed its tolerance test
    pub passed: bool,
}

/// Human-readable view of a verdict.
#[derive(Debug, Clone)]
pub struct ConvergenceReport {
    converged: bool,
    entries: Vec<ReportEntry>,
    unknowns: usize,
}

impl ConvergenceReport {
    /// Build a report with default names (`V(n)` and `I(n)`).
    ///
    /// `unknowns` is the total length of the checked vector; `partition_index`
    /// the number of voltage-like unknowns.
    pub fn new(verdict: &ConvergenceVerdict, partition_index: usize, unknowns: usize) -> Self {
        Self::with_names(verdict, partition_index, unknowns, &[])
    }

    /// Build a report using caller-supplied names where available.
    ///
    /// Detail flags are matched to unknowns positionally. In diagnostic mode
    /// the voltage side may stop early, in which case the remaining flags are
    /// attributed to the current side starting at `partition_index`.
    pub fn with_names(
        verdict: &ConvergenceVerdict,
        partition_index: usize,
        unknowns: usize,
        names: &[String],
    ) -> Self {
        let voltage_flags = voltage_flag_count(&verdict.details, partition_index);

        let entries = verdict
            .details
            .iter()
            .enumerate()
            .map(|(pos, &passed)| {
                let (index, kind) = if pos < voltage_flags {
                    (pos, PartitionKind::Voltage)
                } else {
                    (partition_index + pos - voltage_flags, PartitionKind::Current)
                };
                let name = names
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| default_name(index, kind, partition_index));
                ReportEntry {
                    index,
                    name,
                    kind,
                    passed,
                }
            })
            .collect();

        Self {
            converged: verdict.converged,
            entries,
            unknowns,
        }
    }

    /// Overall verdict.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Checked unknowns, in evaluation order.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Unknowns that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| !e.passed)
    }

    /// Emit a warning for every failing unknown.
    pub fn log_failures(&self) {
        for entry in self.failures() {
            log::warn!(
                "{} ({} unknown {}) has not converged",
                entry.name,
                entry.kind,
                entry.index
            );
        }
    }
}

impl fmt::Display for ConvergenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "{:>5}  {:<12} {:<8} {}",
                entry.index,
                entry.name,
                entry.kind,
                if entry.passed { "PASS" } else { "FAIL" }
            )?;
        }
        write!(
            f,
            "{}: {} unknowns, {} checked individually, {} failed",
            if self.converged { "converged" } else { "not converged" },
            self.unknowns,
            self.entries.len(),
            self.failures().count()
        )
    }
}

/// Number of leading flags that belong to the voltage side.
///
/// The voltage side contributes either all `partition_index` flags or stops
/// right after its first failure.
fn voltage_flag_count(details: &[bool], partition_index: usize) -> usize {
    let head = &details[..details.len().min(partition_index)];
    match head.iter().position(|ok| !ok) {
        Some(first_fail) => first_fail + 1,
        None => head.len(),
    }
}

fn default_name(index: usize, kind: PartitionKind, partition_index: usize) -> String {
    match kind {
        PartitionKind::Voltage => format!("V({})", index + 1),
        PartitionKind::Current => format!("I({})", index - partition_index + 1),
    }
}
